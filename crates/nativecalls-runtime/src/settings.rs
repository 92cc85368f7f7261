//! Typed settings derived from the option table.

use serde::Serialize;

use crate::error::Result;
use crate::options::{ConfigOption, ConfigTable};

/// Build-time properties of the loaded native library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildSettings {
    /// `BR_64`: library was compiled for a 64-bit word size.
    pub is_64_bit: bool,
    /// `BR_AES_X86NI`: AES-NI accelerated implementations are present.
    pub aes_x86ni: bool,
    /// `BR_BE_UNALIGNED`: unaligned big-endian accesses are allowed.
    pub be_unaligned: bool,
    /// `BR_INT128`: a 128-bit integer type is used.
    pub int128: bool,
    /// `BR_LE_UNALIGNED`: unaligned little-endian accesses are allowed.
    pub le_unaligned: bool,
    /// `BR_MAX_EC_SIZE`: largest supported elliptic-curve size, in bits.
    pub max_ec_size: i32,
    /// `BR_MAX_RSA_SIZE`: largest supported RSA modulus, in bits.
    pub max_rsa_size: i32,
    /// `BR_MAX_RSA_FACTOR`: largest supported RSA factor, in bits.
    pub max_rsa_factor: i32,
    /// `BR_SSE2`: SSE2 implementations are present.
    pub sse2: bool,
}

impl BuildSettings {
    /// Derive every setting; each option must be present.
    pub fn from_table(table: &ConfigTable) -> Result<Self> {
        let flag = |name: &str| table.require(name).map(|v| v == 1);
        Ok(Self {
            is_64_bit: flag("BR_64")?,
            aes_x86ni: flag("BR_AES_X86NI")?,
            be_unaligned: flag("BR_BE_UNALIGNED")?,
            int128: flag("BR_INT128")?,
            le_unaligned: flag("BR_LE_UNALIGNED")?,
            max_ec_size: table.require("BR_MAX_EC_SIZE")?,
            max_rsa_size: table.require("BR_MAX_RSA_SIZE")?,
            max_rsa_factor: table.require("BR_MAX_RSA_FACTOR")?,
            sse2: flag("BR_SSE2")?,
        })
    }

    /// Read the native table and derive the settings in one step.
    ///
    /// # Safety
    ///
    /// Same contract as [`ConfigTable::from_raw`].
    pub unsafe fn from_raw(options: *const ConfigOption) -> Result<Self> {
        let table = unsafe { ConfigTable::from_raw(options) }?;
        Self::from_table(&table)
    }
}
