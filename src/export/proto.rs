//! Wire schema of the exposure key export file.
//!
//! proto2 semantics: every scalar is optional on the wire, and prost generates
//! accessor methods (e.g. [`TemporaryExposureKey::rolling_period`]) that fall
//! back to the declared default.

/// Contents of `export.bin` after the magic header
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemporaryExposureKeyExport {
    /// Start of the time window covered by the keys (unix seconds, inclusive)
    #[prost(fixed64, optional, tag = "1")]
    pub start_timestamp: Option<u64>,
    /// End of the time window covered by the keys (unix seconds, exclusive)
    #[prost(fixed64, optional, tag = "2")]
    pub end_timestamp: Option<u64>,
    /// Region the keys were collected in (ISO 3166 alpha-2 or MCC)
    #[prost(string, optional, tag = "3")]
    pub region: Option<String>,
    /// 1-based position of this file within its batch
    #[prost(int32, optional, tag = "4")]
    pub batch_num: Option<i32>,
    /// Number of files in the batch
    #[prost(int32, optional, tag = "5")]
    pub batch_size: Option<i32>,
    /// Signatures covering this export, carried alongside in `export.sig`
    #[prost(message, repeated, tag = "6")]
    pub signature_infos: Vec<SignatureInfo>,
    /// Keys published in this export
    #[prost(message, repeated, tag = "7")]
    pub keys: Vec<TemporaryExposureKey>,
    /// Previously published keys whose fields have changed
    #[prost(message, repeated, tag = "8")]
    pub revised_keys: Vec<TemporaryExposureKey>,
}

/// Signing key metadata for an export
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignatureInfo {
    /// Key version, for rollover
    #[prost(string, optional, tag = "3")]
    pub verification_key_version: Option<String>,
    /// Alias of the verification key (mobile country code)
    #[prost(string, optional, tag = "4")]
    pub verification_key_id: Option<String>,
    /// ASN.1 OID of the signature algorithm
    #[prost(string, optional, tag = "5")]
    pub signature_algorithm: Option<String>,
}

/// A single temporary exposure key
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemporaryExposureKey {
    /// 16 bytes of key material
    #[prost(bytes = "vec", optional, tag = "1")]
    pub key_data: Option<Vec<u8>>,
    /// Deprecated in favour of `report_type`
    #[prost(int32, optional, tag = "2")]
    pub transmission_risk_level: Option<i32>,
    /// Interval number (10-minute units since epoch) when the key became valid
    #[prost(int32, optional, tag = "3")]
    pub rolling_start_interval_number: Option<i32>,
    /// Number of 10-minute intervals the key stays valid
    #[prost(int32, optional, tag = "4", default = "144")]
    pub rolling_period: Option<i32>,
    /// How the uploader's diagnosis was established
    #[prost(enumeration = "ReportType", optional, tag = "5")]
    pub report_type: Option<i32>,
    /// Days between symptom onset and the key's interval
    #[prost(sint32, optional, tag = "6")]
    pub days_since_onset_of_symptoms: Option<i32>,
}

/// Diagnosis type attached to a key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ReportType {
    /// Never returned by the client API
    Unknown = 0,
    /// Confirmed by a lab test
    ConfirmedTest = 1,
    /// Confirmed by a clinician
    ConfirmedClinicalDiagnosis = 2,
    /// Self-reported
    SelfReport = 3,
    /// Reserved
    Recursive = 4,
    /// Used to revoke a previously published key
    Revoked = 5,
}
