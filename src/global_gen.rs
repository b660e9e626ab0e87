//! Process-wide context and entry point functions.

use std::sync;

use crate::{Context, ObjectId, ParseError};

/// Returns the process-wide context, creating one if none exists.
///
/// The context derives the `machine` field from the host name on first use. A host name that
/// cannot be determined leaves the process unable to generate object IDs, so this function
/// panics in that case.
pub fn global_context() -> &'static Context {
    static G: sync::OnceLock<Context> = sync::OnceLock::new();
    G.get_or_init(|| {
        Context::from_host().expect("objectid: could not initialize process-wide context")
    })
}

/// Generates an object ID.
///
/// This function employs the process-wide context, so object IDs generated by concurrent
/// threads never share the same counter value within the 2^24 counter space.
///
/// # Examples
///
/// ```rust
/// let id = objectid::objectid();
/// println!("{}", id); // e.g., "65f1c3a09d4b2e07c1ff0004"
/// println!("{:?}", id.as_bytes()); // as 12-byte big-endian array
///
/// let id_string: String = objectid::objectid().to_string();
/// ```
pub fn objectid() -> ObjectId {
    global_context().generate()
}

/// Parses the 24-digit hexadecimal string representation of an object ID.
///
/// # Examples
///
/// ```rust
/// let id = objectid::parse("501a2b3c1122334455667788")?;
/// assert_eq!(id.timestamp(), 0x501a2b3c);
/// assert_eq!(id.machine(), 0x112233);
/// assert_eq!(id.pid(), 0x4455);
/// assert_eq!(id.counter(), 0x667788);
///
/// assert!(objectid::parse("xyz").is_err());
/// # Ok::<(), objectid::ParseError>(())
/// ```
pub fn parse(input: &str) -> Result<ObjectId, ParseError> {
    input.parse()
}

#[cfg(test)]
mod tests {
    use super::{global_context, objectid, parse};
    use crate::{ObjectId, ParseErrorKind};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<ObjectId> = (0..N_SAMPLES).map(|_| objectid()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let re = regex::Regex::new(r"^[0-9a-f]{24}$").unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(&e.to_string()));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&ObjectId> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Parses string representation back to original
    #[test]
    fn parses_string_representation_back_to_original() {
        SAMPLES.with(|samples| {
            for e in samples {
                assert_eq!(parse(&e.to_string()), Ok(*e));
            }
        });
    }

    /// Encodes process-wide machine and pid
    #[test]
    fn encodes_process_wide_machine_and_pid() {
        let g = global_context();
        assert_eq!(g.pid(), std::process::id() as u16);
        SAMPLES.with(|samples| {
            for e in samples {
                assert_eq!(e.machine(), g.machine() as i32);
                assert_eq!(e.pid(), g.pid() as i32);
                assert!(e.counter() <= 0xffffff);
            }
        });
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use std::time;
        for _ in 0..10_000 {
            let ts_now = time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_secs() as i64;
            let e = objectid();
            assert!((ts_now - e.timestamp()).abs() <= 1);
            assert!(e.creation_time() <= time::SystemTime::now());
        }
    }

    /// Generates no IDs sharing same fields under multithreading
    #[test]
    fn generates_no_ids_sharing_same_fields_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(objectid()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert((e.timestamp(), e.machine(), e.pid(), e.counter()));
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }

    /// Rejects malformed input without panicking
    #[test]
    fn rejects_malformed_input_without_panicking() {
        let hex = "501a2b3c1122334455667788";
        assert_eq!(parse("").unwrap_err().kind(), ParseErrorKind::InvalidLength(0));
        assert_eq!(parse("xyz").unwrap_err().kind(), ParseErrorKind::InvalidLength(3));
        assert_eq!(
            parse(&hex[..23]).unwrap_err().kind(),
            ParseErrorKind::InvalidLength(23)
        );
        assert_eq!(
            parse(&format!("{hex}9")).unwrap_err().kind(),
            ParseErrorKind::InvalidLength(25)
        );
        assert_eq!(
            parse("yz1a2b3c1122334455667788").unwrap_err().kind(),
            ParseErrorKind::InvalidHexDigit {
                position: 0,
                digit: 'y'
            }
        );
    }
}
