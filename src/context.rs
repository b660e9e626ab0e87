//! Generation state shared by the object IDs of a process.

use std::sync::atomic::{AtomicU32, Ordering};
use std::{process, time};

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::{id::MAX_UINT24, HostError, ObjectId};

/// Represents an object ID generator that encapsulates the `machine` and `pid` fields and an
/// atomic counter.
///
/// The `machine` and `pid` fields never change once a context is created. The counter is
/// incremented atomically for every object ID generated, so a context can be shared across
/// threads and no two concurrent calls observe the same counter value.
///
/// # Examples
///
/// ```rust
/// use objectid::Context;
/// use std::thread;
///
/// let g = Context::with_fields(0x112233, 0x4455, 0);
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = &g;
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate(), i);
///             }
///         });
///     }
/// });
/// assert_eq!(g.counter(), 32);
/// ```
#[derive(Debug)]
pub struct Context {
    machine: u32,
    pid: u16,
    counter: AtomicU32,
}

impl Context {
    /// Creates a context with explicit field values.
    ///
    /// `machine` and `seed` are masked to their lowest 24 bits. The first object ID generated
    /// carries the counter value `seed + 1`.
    pub const fn with_fields(machine: u32, pid: u16, seed: u32) -> Self {
        Self {
            machine: machine & MAX_UINT24,
            pid,
            counter: AtomicU32::new(seed & MAX_UINT24),
        }
    }

    /// Creates a context from the host name, the current process ID, and a random counter seed.
    pub fn from_host() -> Result<Self, HostError> {
        let machine = machine_hash(&host_name()?);
        let pid = process::id() as u16;
        let seed = random_seed() & MAX_UINT24;
        tracing::debug!(machine, pid, seed, "initialized object ID context");
        Ok(Self::with_fields(machine, pid, seed))
    }

    /// Returns the 24-bit `machine` field value.
    pub const fn machine(&self) -> u32 {
        self.machine
    }

    /// Returns the 16-bit `pid` field value.
    pub const fn pid(&self) -> u16 {
        self.pid
    }

    /// Returns the current counter state, i.e., the `counter` value of the most recently
    /// generated object ID or the seed if none has been generated.
    pub fn counter(&self) -> u32 {
        self.counter.load(Ordering::Relaxed) & MAX_UINT24
    }

    /// Replaces the counter state with `seed` masked to 24 bits.
    pub fn reset_counter(&self, seed: u32) {
        self.counter.store(seed & MAX_UINT24, Ordering::Relaxed);
    }

    /// Generates a new object ID from the current timestamp.
    pub fn generate(&self) -> ObjectId {
        self.generate_core(
            time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_secs() as u32,
        )
    }

    /// Generates a new object ID from the `timestamp` passed.
    pub fn generate_core(&self, timestamp: u32) -> ObjectId {
        ObjectId::from_fields(timestamp, self.machine, self.pid, self.next_counter())
    }

    /// Increments the counter and returns the new value.
    ///
    /// The cell wraps at 2^32, which is a multiple of 2^24, so the masked value wraps correctly.
    fn next_counter(&self) -> u32 {
        self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1) & MAX_UINT24
    }
}

/// Returns the first three bytes of the SHA-256 digest of `host_name` as a 24-bit integer.
fn machine_hash(host_name: &str) -> u32 {
    let digest = Sha256::digest(host_name.as_bytes());
    u32::from_be_bytes([0, digest[0], digest[1], digest[2]])
}

#[cfg(unix)]
fn host_name() -> Result<String, HostError> {
    let name = nix::unistd::gethostname().map_err(std::io::Error::from)?;
    let name = name.to_string_lossy();
    if name.is_empty() {
        Err(HostError::Unavailable)
    } else {
        Ok(name.into_owned())
    }
}

#[cfg(not(unix))]
fn host_name() -> Result<String, HostError> {
    match std::env::var("COMPUTERNAME") {
        Ok(name) if !name.is_empty() => Ok(name),
        _ => Err(HostError::Unavailable),
    }
}

/// Returns a random number from the OS, or the sub-second part of the system clock if the OS
/// entropy source is unavailable.
fn random_seed() -> u32 {
    let mut bytes = [0u8; 4];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => u32::from_ne_bytes(bytes),
        Err(err) => {
            tracing::warn!(%err, "falling back to clock-derived counter seed");
            time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .map_or(0, |d| d.subsec_nanos())
        }
    }
}
