//! Conversion between the provider's host records and record file entries.
//!
//! Towards the file nothing is validated, the provider's data is taken as is.
//! Towards the provider every record is validated, and a single invalid record
//! fails the whole set, since the set replaces everything at the provider.

use crate::common::{
    Record, RecordData, RecordType, Result, ValidationFailure, ValidationSnafu, DEFAULT_TTL,
    MAX_TTL, MIN_TTL,
};
use crate::namecheap::HostRecord;
use crate::yamlfile::{FieldValue, FileRecord};

const MISSING: &str = "<missing>";

fn non_empty(value: Option<String>) -> Option<FieldValue> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(FieldValue::from)
}

fn to_file_record(host: HostRecord) -> FileRecord {
    let is_mail = host
        .record_type
        .parse::<RecordType>()
        .map(|kind| kind.is_mail())
        .unwrap_or(false);
    let default_ttl = DEFAULT_TTL.to_string();

    FileRecord {
        address: non_empty(Some(host.address)),
        host_name: non_empty(Some(host.host_name)),
        // The provider reports a preference for every host
        mx_pref: non_empty(host.mx_pref).filter(|_| is_mail),
        record_type: non_empty(Some(host.record_type)),
        ttl: non_empty(host.ttl).filter(|ttl| ttl.as_str().trim() != default_ttl),
    }
}

/// Maps listed host records to file records, one to one and in order.
/// Empty fields, preferences of non mail records and the provider's default
/// TTL are left out.
pub fn to_file_format(hosts: Vec<HostRecord>) -> Vec<FileRecord> {
    hosts.into_iter().map(to_file_record).collect()
}

/// Validates one file record. `index` is its 1-based position in the file.
pub fn validate_record(index: usize, record: FileRecord) -> Result<Record> {
    let FileRecord {
        address,
        host_name,
        mx_pref,
        record_type,
        ttl,
    } = record;

    let invalid = |reason: ValidationFailure| {
        let describe = |value: &Option<FieldValue>| {
            value
                .as_ref()
                .map(FieldValue::to_string)
                .unwrap_or_else(|| MISSING.to_string())
        };
        ValidationSnafu {
            index,
            host_name: describe(&host_name),
            record_type: describe(&record_type),
            reason,
        }
        .build()
    };

    let name = match &host_name {
        Some(name) if !name.as_str().trim().is_empty() => name.as_str().trim().to_string(),
        _ => return Err(invalid(ValidationFailure::MissingField("HostName"))),
    };

    let kind = record_type
        .as_ref()
        .ok_or(ValidationFailure::UnknownRecordType)
        .and_then(|kind| kind.as_str().trim().parse::<RecordType>())
        .map_err(&invalid)?;

    let address = address
        .map(String::from)
        .ok_or(ValidationFailure::MissingField("Address"))
        .map_err(&invalid)?;

    let data = RecordData::new(kind, address, mx_pref.as_ref().map(FieldValue::as_str))
        .map_err(&invalid)?;
    if !kind.is_mail() && mx_pref.is_some() {
        tracing::warn!(
            index = index,
            host_name = name.as_str(),
            kind = kind.as_str(),
            "Ignoring MXPref of a non MX record"
        );
    }

    let ttl = ttl
        .as_ref()
        .map(|ttl| {
            ttl.as_str()
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|ttl| (MIN_TTL..=MAX_TTL).contains(ttl))
                .ok_or(ValidationFailure::InvalidTtl)
        })
        .transpose()
        .map_err(&invalid)?;

    Ok(Record {
        host_name: name,
        ttl,
        data,
    })
}

/// Validates and maps file records to provider records. Either every record
/// is valid and all are returned in order, or the first invalid one is
/// reported and nothing is returned.
pub fn to_provider_format(records: Vec<FileRecord>) -> Result<Vec<HostRecord>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| validate_record(index + 1, record).map(HostRecord::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::yamlfile::parse_records;

    fn host(name: &str, kind: &str, address: &str, mx_pref: &str, ttl: &str) -> HostRecord {
        HostRecord {
            host_name: name.into(),
            record_type: kind.into(),
            address: address.into(),
            mx_pref: Some(mx_pref.into()),
            ttl: Some(ttl.into()),
        }
    }

    fn reason(err: Error) -> (usize, String, String, ValidationFailure) {
        match err {
            Error::ValidationError {
                index,
                host_name,
                record_type,
                reason,
            } => (index, host_name, record_type, reason),
            other => panic!("expected a validation error, got {other}"),
        }
    }

    #[test]
    fn a_record_keeps_ttl_and_drops_mx_pref() {
        let records =
            parse_records("- {Address: 127.0.0.1, HostName: localhost, RecordType: A, TTL: '180'}")
                .unwrap();

        let hosts = to_provider_format(records).unwrap();
        assert_eq!(
            hosts,
            vec![HostRecord {
                host_name: "localhost".into(),
                record_type: "A".into(),
                address: "127.0.0.1".into(),
                mx_pref: None,
                ttl: Some("180".into()),
            }]
        );
    }

    #[test]
    fn extraneous_mx_pref_never_reaches_the_provider() {
        let records =
            parse_records("- {Address: example.com., HostName: www, RecordType: CNAME, MXPref: 5}")
                .unwrap();

        let hosts = to_provider_format(records).unwrap();
        assert_eq!(hosts[0].mx_pref, None);
    }

    #[test]
    fn host_name_is_trimmed() {
        let records =
            parse_records("- {Address: 1.2.3.4, HostName: ' www ', RecordType: A}").unwrap();

        let hosts = to_provider_format(records).unwrap();
        assert_eq!(hosts[0].host_name, "www");
    }

    #[test]
    fn mx_record_without_ttl_relies_on_provider_default() {
        let records =
            parse_records("- {Address: email.my.domain, MXPref: 10, HostName: '@', RecordType: MX}")
                .unwrap();

        let hosts = to_provider_format(records).unwrap();
        assert_eq!(hosts[0].mx_pref.as_deref(), Some("10"));
        assert_eq!(hosts[0].ttl, None);
    }

    #[test]
    fn missing_address_names_the_record() {
        let records = parse_records("- {HostName: www, RecordType: CNAME}").unwrap();

        let (index, host_name, record_type, failure) =
            reason(to_provider_format(records).unwrap_err());
        assert_eq!(index, 1);
        assert_eq!(host_name, "www");
        assert_eq!(record_type, "CNAME");
        assert_eq!(failure, ValidationFailure::MissingField("Address"));
    }

    #[test]
    fn missing_or_empty_host_name_is_rejected() {
        for doc in [
            "- {RecordType: A, Address: 1.2.3.4}",
            "- {HostName: '', RecordType: A, Address: 1.2.3.4}",
        ] {
            let (_, host_name, _, failure) =
                reason(to_provider_format(parse_records(doc).unwrap()).unwrap_err());
            assert_eq!(failure, ValidationFailure::MissingField("HostName"));
            assert!(host_name == MISSING || host_name.is_empty());
        }
    }

    #[test]
    fn unknown_or_missing_record_type_is_rejected() {
        for doc in [
            "- {HostName: www, RecordType: SRV, Address: 1.2.3.4}",
            "- {HostName: www, Address: 1.2.3.4}",
        ] {
            let (_, _, _, failure) =
                reason(to_provider_format(parse_records(doc).unwrap()).unwrap_err());
            assert_eq!(failure, ValidationFailure::UnknownRecordType);
        }
    }

    #[test]
    fn mail_records_need_an_integer_preference() {
        for doc in [
            "- {HostName: '@', RecordType: MX, Address: mail.example.com}",
            "- {HostName: '@', RecordType: MXE, Address: 192.0.2.1, MXPref: high}",
        ] {
            let (_, _, _, failure) =
                reason(to_provider_format(parse_records(doc).unwrap()).unwrap_err());
            assert_eq!(failure, ValidationFailure::MissingMxPref);
        }
    }

    #[test]
    fn ttl_outside_accepted_range_is_rejected() {
        for ttl in ["0", "-5", "59", "60001", "soon"] {
            let doc = format!("- {{HostName: www, RecordType: A, Address: 1.2.3.4, TTL: '{ttl}'}}");
            let (_, _, _, failure) =
                reason(to_provider_format(parse_records(&doc).unwrap()).unwrap_err());
            assert_eq!(failure, ValidationFailure::InvalidTtl, "ttl {ttl}");
        }
    }

    #[test]
    fn first_invalid_record_fails_the_whole_set() {
        let records = parse_records(
            "- {HostName: ok, RecordType: A, Address: 1.2.3.4}\n\
             - {HostName: bad, RecordType: MX, Address: mail.example.com}\n\
             - {HostName: worse, RecordType: NOPE, Address: 1.2.3.4}\n",
        )
        .unwrap();

        let (index, host_name, _, failure) = reason(to_provider_format(records).unwrap_err());
        assert_eq!(index, 2);
        assert_eq!(host_name, "bad");
        assert_eq!(failure, ValidationFailure::MissingMxPref);
    }

    #[test]
    fn output_is_canonical_and_deterministic() {
        let doc = "- {HostName: mail, RecordType: mx, Address: mx.example.com, MXPref: '010', TTL: '0300'}\n";
        let first = to_provider_format(parse_records(doc).unwrap()).unwrap();
        let second = to_provider_format(parse_records(doc).unwrap()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].record_type, "MX");
        assert_eq!(first[0].mx_pref.as_deref(), Some("10"));
        assert_eq!(first[0].ttl.as_deref(), Some("300"));
    }

    #[test]
    fn file_format_drops_provider_noise() {
        let records = to_file_format(vec![
            host("www", "A", "127.0.0.1", "10", "1800"),
            host("@", "MX", "mail.example.com", "20", "300"),
            host("txt", "TXT", "", "10", ""),
        ]);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].mx_pref, None);
        assert_eq!(records[0].ttl, None);
        assert_eq!(records[1].mx_pref, Some("20".into()));
        assert_eq!(records[1].ttl, Some("300".into()));
        assert_eq!(records[2].address, None);
        assert_eq!(records[2].ttl, None);
    }

    #[test]
    fn valid_file_records_survive_a_round_trip() {
        let records = parse_records(
            "- {Address: 127.0.0.1, HostName: localhost, RecordType: A, TTL: '180'}\n\
             - {Address: email.my.domain, HostName: '@', MXPref: '10', RecordType: MX}\n\
             - {Address: example.com., HostName: www, RecordType: CNAME}\n\
             - {Address: 'v=spf1 -all', HostName: '@', RecordType: TXT, TTL: '3600'}\n",
        )
        .unwrap();

        let round_tripped = to_file_format(to_provider_format(records.clone()).unwrap());
        assert_eq!(round_tripped, records);
    }
}
