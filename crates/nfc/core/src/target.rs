//! Targets found while polling or selecting

use std::fmt;

use bytes::Bytes;

use crate::modulation::Modulation;

/// ISO/IEC 14443A target information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iso14443aInfo {
    /// Answer To reQuest, type A
    pub atqa: [u8; 2],
    /// Select AcKnowledge
    pub sak: u8,
    /// Unique identifier (4, 7 or 10 bytes)
    pub uid: Bytes,
    /// Answer To Select, empty when the target is not ISO14443-4 compliant
    pub ats: Bytes,
}

/// FeliCa target information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FelicaInfo {
    /// Response code
    pub res_code: u8,
    /// IDm
    pub id: [u8; 8],
    /// PMm
    pub pad: [u8; 8],
    /// System code
    pub sys_code: [u8; 2],
}

/// ISO/IEC 14443B target information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iso14443bInfo {
    /// Pseudo-Unique PICC Identifier
    pub pupi: [u8; 4],
    /// Application data
    pub application_data: [u8; 4],
    /// Protocol info
    pub protocol_info: [u8; 3],
    /// Card identifier
    pub card_identifier: u8,
}

/// Innovision Jewel target information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JewelInfo {
    /// SENS_RES
    pub sens_res: [u8; 2],
    /// Identifier
    pub id: [u8; 4],
}

/// Modulation specific information about a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetInfo {
    /// ISO/IEC 14443A
    Iso14443a(Iso14443aInfo),
    /// FeliCa
    Felica(FelicaInfo),
    /// ISO/IEC 14443B
    Iso14443b(Iso14443bInfo),
    /// Innovision Jewel
    Jewel(JewelInfo),
    /// A modulation the binding does not decode
    Other,
}

/// A target discovered by an initiator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Modulation the target answered with
    pub modulation: Modulation,
    /// Decoded target information
    pub info: TargetInfo,
}

impl Target {
    /// Create a new target
    pub const fn new(modulation: Modulation, info: TargetInfo) -> Self {
        Self { modulation, info }
    }

    /// The identifier the target reported, if its modulation has one
    pub fn uid(&self) -> Option<&[u8]> {
        match &self.info {
            TargetInfo::Iso14443a(info) => Some(info.uid.as_ref()),
            TargetInfo::Felica(info) => Some(&info.id[..]),
            TargetInfo::Iso14443b(info) => Some(&info.pupi[..]),
            TargetInfo::Jewel(info) => Some(&info.id[..]),
            TargetInfo::Other => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} target:", self.modulation)?;
        match &self.info {
            TargetInfo::Iso14443a(info) => {
                writeln!(f, "    ATQA (SENS_RES): {}", hex::encode_upper(info.atqa))?;
                writeln!(f, "       UID (NFCID1): {}", hex::encode_upper(&info.uid))?;
                write!(f, "      SAK (SEL_RES): {:02X}", info.sak)?;
                if !info.ats.is_empty() {
                    write!(f, "\n                ATS: {}", hex::encode_upper(&info.ats))?;
                }
                Ok(())
            }
            TargetInfo::Felica(info) => {
                writeln!(f, "        ID (NFCID2): {}", hex::encode_upper(info.id))?;
                writeln!(f, "    Parameter (PAD): {}", hex::encode_upper(info.pad))?;
                write!(f, "   System Code (SC): {}", hex::encode_upper(info.sys_code))
            }
            TargetInfo::Iso14443b(info) => {
                writeln!(f, "               PUPI: {}", hex::encode_upper(info.pupi))?;
                writeln!(
                    f,
                    "   Application Data: {}",
                    hex::encode_upper(info.application_data)
                )?;
                writeln!(
                    f,
                    "      Protocol Info: {}",
                    hex::encode_upper(info.protocol_info)
                )?;
                write!(f, "                CID: {:02X}", info.card_identifier)
            }
            TargetInfo::Jewel(info) => {
                writeln!(f, "    ATQA (SENS_RES): {}", hex::encode_upper(info.sens_res))?;
                write!(f, "      4-LSB JEWELID: {}", hex::encode_upper(info.id))
            }
            TargetInfo::Other => write!(f, "    (no decoded information)"),
        }
    }
}
