//! Mapping between `wildns_domain::RecordType` and `hickory_proto::rr::RecordType`.
//!
//! Both sides agree on the IANA type code, so the conversion goes through `u16`
//! and never loses a type: codes without a named variant travel as
//! `RecordType::Unknown`.

use hickory_proto::rr::RecordType as HickoryRecordType;
use wildns_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Domain type → hickory type (outgoing queries)
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    /// Hickory type → domain type (incoming queries)
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
