//! Online command implementation.

use airtrack_core::{Callsign, Cid, Roster};
use serde_json::{Map, Value};
use tracing::info;

/// Runs the online command.
pub fn run(
    roster: &Roster,
    cid: &str,
    callsign: &str,
    attrs: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let cid = Cid::parse(cid)?;
    let callsign = Callsign::parse(callsign)?;
    let attributes = parse_attributes(attrs)?;

    let record = roster.set_online(&cid, &callsign, attributes)?;
    info!(kind = %roster.kind(), cid = %cid, callsign = %callsign, "set online");
    super::print_record(&record)
}

/// Parses `key=value` pairs into a JSON attribute map.
fn parse_attributes(attrs: &[String]) -> Result<Map<String, Value>, String> {
    let mut attributes = Map::new();
    for attr in attrs {
        let Some((key, value)) = attr.split_once('=') else {
            return Err(format!("invalid attribute {attr:?}: expected key=value"));
        };
        attributes.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_parse_key_value_pairs() {
        let attrs = parse_attributes(&["aircraft=B738".into(), "route=KSFO KLAX".into()]).unwrap();
        assert_eq!(attrs["aircraft"], Value::String("B738".into()));
        assert_eq!(attrs["route"], Value::String("KSFO KLAX".into()));
    }

    #[test]
    fn attributes_reject_missing_equals() {
        assert!(parse_attributes(&["aircraft".into()]).is_err());
    }

    #[test]
    fn attributes_keep_equals_in_value() {
        let attrs = parse_attributes(&["remarks=a=b".into()]).unwrap();
        assert_eq!(attrs["remarks"], Value::String("a=b".into()));
    }
}
