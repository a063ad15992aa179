//! Renders locally produced answers as hickory records.

use hickory_proto::rr::rdata::{A, CNAME, NS};
use hickory_proto::rr::{Name, RData, Record};
use wildns_domain::{AnswerRecord, DomainError};

pub fn to_record(answer: &AnswerRecord) -> Result<Record, DomainError> {
    let owner = fqdn(answer.name())?;

    let rdata = match answer {
        AnswerRecord::Address { address, .. } => RData::A(A(*address)),
        AnswerRecord::Alias { target, .. } => RData::CNAME(CNAME(fqdn(target)?)),
        AnswerRecord::Nameserver { host, .. } => RData::NS(NS(fqdn(host)?)),
    };

    Ok(Record::from_rdata(owner, answer.ttl(), rdata))
}

pub fn to_records(answers: &[AnswerRecord]) -> Result<Vec<Record>, DomainError> {
    answers.iter().map(to_record).collect()
}

fn fqdn(name: &str) -> Result<Name, DomainError> {
    let mut name = Name::from_ascii(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", name, e)))?;
    name.set_fqdn(true);
    Ok(name)
}
