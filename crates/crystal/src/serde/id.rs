use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialize a [`CrystalId`] as its native `i64`.
///
/// ```
/// use crystal::{CrystalId, as_int};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     #[serde(with = "as_int")]
///     id: CrystalId,
/// }
/// ```
///
/// [`CrystalId`]: crate::CrystalId
pub mod as_int {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::CrystalId;

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &CrystalId, s: S) -> Result<S::Ok, S::Error> {
        id.to_i64().serialize(s)
    }

    /// Accepts any `i64`, like [`CrystalId::from_i64`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<CrystalId, D::Error> {
        i64::deserialize(d).map(CrystalId::from_i64)
    }
}

/// Serialize a [`CrystalId`] as its 13 character base32 string.
///
/// [`CrystalId`]: crate::CrystalId
pub mod as_base32 {
    use super::{Deserializer, Serializer};
    use crate::CrystalId;

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &CrystalId, s: S) -> Result<S::Ok, S::Error> {
        let mut buf = CrystalId::base32_buf();
        s.serialize_str(id.encode_base32_to_buf(&mut buf))
    }

    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string is
    /// not a valid base32 identifier.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<CrystalId, D::Error> {
        struct Base32Visitor;

        impl ::serde::de::Visitor<'_> for Base32Visitor {
            type Value = CrystalId;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 13 character base32 string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: ::serde::de::Error,
            {
                CrystalId::from_base32(v).map_err(E::custom)
            }
        }

        d.deserialize_str(Base32Visitor)
    }
}

/// Serialize a [`CrystalId`] as its 16 character hex string.
///
/// [`CrystalId`]: crate::CrystalId
pub mod as_hex {
    use super::{Deserializer, Serializer};
    use crate::CrystalId;

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &CrystalId, s: S) -> Result<S::Ok, S::Error> {
        let mut buf = CrystalId::hex_buf();
        s.serialize_str(id.encode_hex_to_buf(&mut buf))
    }

    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string is
    /// not a valid hex identifier.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<CrystalId, D::Error> {
        struct HexVisitor;

        impl ::serde::de::Visitor<'_> for HexVisitor {
            type Value = CrystalId;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 16 character hex string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: ::serde::de::Error,
            {
                CrystalId::from_hex(v).map_err(E::custom)
            }
        }

        d.deserialize_str(HexVisitor)
    }
}
