//! Conversion of protocol messages into wire representations.
//!
//! Two representations exist: the byte-level codec used by transports
//! ([`encode`]/[`decode`] with a selected [`Encoding`]) and the textual
//! json form used for over-the-wire transfer to the platform as well as
//! for logging ([`to_wire_text`]).

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// List of possible formats for encoding messages sent over the wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub enum Encoding {
    /// Fast binary format for communication between Rust processes
    Bincode,
    /// Very common but more verbose format
    Json,
    /// Binary format with implementations in many different languages
    #[cfg(feature = "msgpack_encoding")]
    MsgPack,
}

impl FromStr for Encoding {
    type Err = Error;
    fn from_str(s: &str) -> core::result::Result<Self, Error> {
        let e = match s.to_lowercase().as_str() {
            "bincode" | "bin" => Self::Bincode,
            "json" => Self::Json,
            #[cfg(feature = "msgpack_encoding")]
            "msgpack" | "messagepack" | "rmp" => Self::MsgPack,
            _ => {
                return Err(Error::ParsingError(format!(
                    "failed parsing encoding from string: {}",
                    s
                )))
            }
        };
        Ok(e)
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bincode => write!(f, "bincode"),
            Self::Json => write!(f, "json"),
            #[cfg(feature = "msgpack_encoding")]
            Self::MsgPack => write!(f, "msgpack"),
        }
    }
}

/// Packs a message into bytes based on selected encoding.
pub fn encode<M: Serialize>(msg: &M, encoding: &Encoding) -> Result<Vec<u8>> {
    let packed = match encoding {
        Encoding::Bincode => bincode::serialize(msg)?,
        Encoding::Json => serde_json::to_vec(msg)?,
        #[cfg(feature = "msgpack_encoding")]
        Encoding::MsgPack => rmp_serde::to_vec(msg)?,
    };
    Ok(packed)
}

/// Unpacks a message from bytes based on selected encoding.
pub fn decode<'de, M: Deserialize<'de>>(bytes: &'de [u8], encoding: &Encoding) -> Result<M> {
    let unpacked = match encoding {
        Encoding::Bincode => bincode::deserialize(bytes)?,
        Encoding::Json => serde_json::from_slice(bytes)?,
        #[cfg(feature = "msgpack_encoding")]
        Encoding::MsgPack => rmp_serde::from_slice(bytes)?,
    };
    Ok(unpacked)
}

/// Attempts structured json encoding of a message.
pub(crate) fn to_json<M: Serialize>(msg: &M) -> Result<String> {
    Ok(serde_json::to_string(msg)?)
}

/// Renders a message to its textual wire form, falling back to the
/// debug representation when structured encoding fails.
///
/// This function never fails. The textual form is primarily consumed by
/// logging and debugging on the platform side, so a degraded but
/// present rendition beats a propagated encoding error. On the fallback
/// path a single diagnostic is logged, naming the concrete message kind
/// and the encoding failure.
pub fn to_wire_text<M: Serialize + Debug>(kind: &str, msg: &M) -> String {
    match to_json(msg) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "failed encoding {} message to json: {}, falling back to debug representation",
                kind, e
            );
            format!("{:?}", msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;
    use crate::rpc::worker::{SetPlatformVar, WorkerToPlatform};
    use crate::{Result, Var};

    #[test]
    fn encoding_from_string() -> Result<()> {
        assert_eq!("bin".parse::<Encoding>()?, Encoding::Bincode);
        assert_eq!("JSON".parse::<Encoding>()?, Encoding::Json);
        assert!("protobuf".parse::<Encoding>().is_err());
        Ok(())
    }

    #[test]
    fn bincode_roundtrip_preserves_var() -> Result<()> {
        let var = Var::List(vec![Var::from(1), Var::from("two"), Var::Bytes(vec![3])]);
        let bytes = encode(&var, &Encoding::Bincode)?;
        let back: Var = decode(&bytes, &Encoding::Bincode)?;
        assert_eq!(back, var);
        Ok(())
    }

    /// A map keyed by non-string vars is valid in memory and over the
    /// binary encodings, but json cannot express it.
    fn unencodable_payload() -> Var {
        Var::Map(BTreeMap::from([(Var::Int(1), Var::from("one"))]))
    }

    #[test]
    fn json_rejects_non_string_map_keys() {
        assert!(to_json(&unencodable_payload()).is_err());

        let bytes = encode(&unencodable_payload(), &Encoding::Bincode).unwrap();
        let back: Var = decode(&bytes, &Encoding::Bincode).unwrap();
        assert_eq!(back, unencodable_payload());
    }

    struct CapturingSink(Mutex<Vec<String>>);

    impl log::Log for CapturingSink {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.0.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    static SINK: CapturingSink = CapturingSink(Mutex::new(Vec::new()));

    /// Exercises the fallback path end to end: the caller still gets a
    /// non-empty string and exactly one diagnostic is emitted, naming
    /// the concrete message kind.
    #[test]
    fn wire_text_falls_back_on_unencodable_payload() {
        log::set_logger(&SINK).unwrap();
        log::set_max_level(log::LevelFilter::Warn);

        let addr = vec![0x7f, 0x00, 0x00, 0x01];
        let msg = SetPlatformVar::new("worker-7", "stats", unencodable_payload(), addr.clone());

        let wire = msg.to_wire_text();
        assert!(!wire.is_empty());
        assert!(wire.contains("SetPlatformVar"));
        assert_eq!(msg.client_address(), addr.as_slice());

        let records = SINK.0.lock().unwrap();
        let diagnostics = records
            .iter()
            .filter(|r| r.contains("SetPlatformVar"))
            .count();
        assert_eq!(diagnostics, 1);
    }
}
