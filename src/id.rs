use std::{fmt, str, time};

use fstr::FStr;

use crate::{ParseError, ParseErrorKind};

/// The largest value representable in the 24-bit `machine` and `counter` fields.
pub(crate) const MAX_UINT24: u32 = (1 << 24) - 1;

/// Represents a 12-byte object ID.
///
/// The bytes are held in big-endian order: a 32-bit `timestamp`, a 24-bit `machine`, a 16-bit
/// `pid`, and a 24-bit `counter`, so the derived ordering sorts IDs by creation second first.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Nil object ID (000000000000000000000000)
    pub const NIL: Self = Self([0x00; 12]);

    /// Max object ID (ffffffffffffffffffffffff)
    pub const MAX: Self = Self([0xff; 12]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Creates an object ID from field values.
    ///
    /// `machine` and `counter` are masked to their lowest 24 bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objectid::ObjectId;
    ///
    /// let x = ObjectId::from_fields(0x501a2b3c, 0x112233, 0x4455, 0x667788);
    /// assert_eq!(x.to_string(), "501a2b3c1122334455667788");
    /// ```
    pub const fn from_fields(timestamp: u32, machine: u32, pid: u16, counter: u32) -> Self {
        let machine = machine & MAX_UINT24;
        let counter = counter & MAX_UINT24;

        Self([
            (timestamp >> 24) as u8,
            (timestamp >> 16) as u8,
            (timestamp >> 8) as u8,
            timestamp as u8,
            (machine >> 16) as u8,
            (machine >> 8) as u8,
            machine as u8,
            (pid >> 8) as u8,
            pid as u8,
            (counter >> 16) as u8,
            (counter >> 8) as u8,
            counter as u8,
        ])
    }

    /// Returns the `timestamp` field in seconds since the Unix epoch.
    pub const fn timestamp(&self) -> i64 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]) as i64
    }

    /// Returns the 24-bit `machine` field.
    pub const fn machine(&self) -> i32 {
        ((self.0[4] as i32) << 16) | ((self.0[5] as i32) << 8) | self.0[6] as i32
    }

    /// Returns the 16-bit `pid` field.
    pub const fn pid(&self) -> i32 {
        ((self.0[7] as i32) << 8) | self.0[8] as i32
    }

    /// Returns the 24-bit `counter` field.
    pub const fn counter(&self) -> i32 {
        let counter = ((self.0[9] as i32) << 16) | ((self.0[10] as i32) << 8) | self.0[11] as i32;
        counter & MAX_UINT24 as i32
    }

    /// Returns the time the object ID was created, at a resolution of one second.
    pub fn creation_time(&self) -> time::SystemTime {
        time::UNIX_EPOCH + time::Duration::from_secs(self.timestamp() as u64)
    }

    /// Returns the 24-digit hexadecimal string representation stored in a stack-allocated
    /// string type that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use objectid::ObjectId;
    ///
    /// let x = "501A2B3C1122334455667788".parse::<ObjectId>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "501a2b3c1122334455667788");
    /// assert_eq!(format!("{}", y), "501a2b3c1122334455667788");
    /// # Ok::<(), objectid::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<24> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 24];
        for (i, e) in self.0.iter().enumerate() {
            buffer[i * 2] = DIGITS[(e >> 4) as usize];
            buffer[i * 2 + 1] = DIGITS[(e & 15) as usize];
        }
        debug_assert!(buffer.is_ascii());
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

impl fmt::Display for ObjectId {
    /// Returns the 24-digit lowercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for ObjectId {
    type Err = ParseError;

    /// Creates an object from the 24-digit hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let len = src.chars().count();
        if len != 24 {
            return Err(reject(src, ParseErrorKind::InvalidLength(len)));
        }

        let mut dst = [0u8; 12];
        for (position, digit) in src.chars().enumerate() {
            let Some(value) = digit.to_digit(16) else {
                return Err(reject(
                    src,
                    ParseErrorKind::InvalidHexDigit { position, digit },
                ));
            };
            let shift = if position % 2 == 0 { 4 } else { 0 };
            dst[position / 2] |= (value as u8) << shift;
        }
        Ok(Self(dst))
    }
}

fn reject(src: &str, kind: ParseErrorKind) -> ParseError {
    tracing::trace!(input = src, %kind, "rejected object ID representation");
    ParseError::new(src, kind)
}

impl From<ObjectId> for [u8; 12] {
    fn from(src: ObjectId) -> Self {
        src.0
    }
}

impl From<[u8; 12]> for ObjectId {
    fn from(src: [u8; 12]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<ObjectId> for String {
    fn from(src: ObjectId) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for ObjectId {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl TryFrom<&str> for ObjectId {
    type Error = ParseError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "chrono")]
#[cfg_attr(docsrs, doc(cfg(feature = "chrono")))]
mod chrono_support {
    use super::ObjectId;
    use chrono::{DateTime, Utc};

    impl From<ObjectId> for DateTime<Utc> {
        /// Returns the creation time of the object ID.
        fn from(src: ObjectId) -> Self {
            // any u32 second count is within the range chrono supports
            DateTime::from_timestamp(src.timestamp(), 0).unwrap_or_default()
        }
    }

}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, ObjectId};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for ObjectId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for ObjectId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = ObjectId;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a 24-digit hex string or 12-byte array")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 12]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
