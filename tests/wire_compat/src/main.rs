fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use kopro_push_wire::constants::{APP_ICON, DEFAULT_BODY, DEFAULT_TAG, PRODUCT_NAME};
    use kopro_push_wire::{Envelope, MessageType, NotificationSpec, PushPayload};
    use kopro_roles::Role;
    use kopro_router::ClickEvent;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture file as raw bytes.
    fn load_bytes(name: &str) -> Vec<u8> {
        let path = fixtures_dir().join(name);
        fs::read(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let data = load_bytes(name);
        serde_json::from_slice(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and
    /// compares the JSON values (order-independent comparison).
    ///
    /// Goes through strings rather than `serde_json::Value` so types
    /// carrying `RawValue` payloads roundtrip too.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let bytes = load_bytes(name);
        let parsed: T = serde_json::from_slice(&bytes)
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_string(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        let wire: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let rust: serde_json::Value = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(
            wire, rust,
            "roundtrip mismatch for {name}:\n  wire: {wire}\n  rust: {rust}"
        );
    }

    // --- Push payload fixtures ---

    #[test]
    fn fixture_push_full_roundtrips() {
        roundtrip_test::<PushPayload>("push_full.json");
    }

    #[test]
    fn fixture_push_partial_roundtrips() {
        roundtrip_test::<PushPayload>("push_partial.json");
    }

    #[test]
    fn fixture_push_full_resolves_verbatim() {
        let spec = NotificationSpec::from_bytes(&load_bytes("push_full.json"));
        assert_eq!(spec.title, "Assemblée générale");
        assert_eq!(spec.body, "Le compte-rendu est disponible");
        assert_eq!(spec.icon, "/icons/ag.png");
        assert_eq!(spec.tag, "ag-2026");
        assert_eq!(spec.data_url, "/documents/42");
        assert_eq!(spec.actions.len(), 1);
        assert!(spec.require_interaction);
    }

    #[test]
    fn fixture_push_minimal_resolves_to_defaults() {
        let spec = NotificationSpec::from_bytes(&load_bytes("push_minimal.json"));
        assert_eq!(spec.title, PRODUCT_NAME);
        assert_eq!(spec.body, DEFAULT_BODY);
        assert_eq!(spec.icon, APP_ICON);
        assert_eq!(spec.tag, DEFAULT_TAG);
        assert_eq!(spec.data_url, "/");
        assert!(spec.actions.is_empty());
        assert!(!spec.require_interaction);
    }

    #[test]
    fn fixture_push_partial_fills_only_missing() {
        let spec = NotificationSpec::from_bytes(&load_bytes("push_partial.json"));
        assert_eq!(spec.body, "Un colis vous attend à l'accueil");
        assert_eq!(spec.tag, "colis");
        // The rest comes from the defaults.
        assert_eq!(spec.title, PRODUCT_NAME);
        assert_eq!(spec.data_url, "/");
    }

    #[test]
    fn fixture_push_unknown_fields_are_ignored() {
        let payload = PushPayload::decode(&load_bytes("push_unknown_fields.json"));
        assert_eq!(payload.title.as_deref(), Some("Entretien chaudière"));
        assert!(payload.body.is_none());
    }

    // --- Delivery channel fixtures ---

    #[test]
    fn fixture_envelope_push_roundtrips() {
        roundtrip_test::<Envelope>("envelope_push.json");
    }

    #[test]
    fn fixture_envelope_push_routes_as_push() {
        let env: Envelope = serde_json::from_slice(&load_bytes("envelope_push.json")).unwrap();
        assert_eq!(env.msg_type, MessageType::Push);
        let spec = NotificationSpec::from_bytes(env.payload_bytes().unwrap());
        assert_eq!(spec.tag, "incident-7");
    }

    #[test]
    fn fixture_envelope_error_roundtrips() {
        roundtrip_test::<Envelope>("envelope_error.json");
    }

    #[test]
    fn fixture_click_event_roundtrips() {
        roundtrip_test::<ClickEvent>("click_event.json");
    }

    // --- Role fixtures ---

    #[test]
    fn fixture_roles_map_to_ranks() {
        let fixture = load_fixture("roles.json");
        let entries = fixture.as_array().expect("roles fixture is an array");
        assert_eq!(entries.len(), 4);
        for entry in entries {
            let role: Role = serde_json::from_value(entry["role"].clone()).unwrap();
            assert_eq!(u64::from(role.rank()), entry["rank"].as_u64().unwrap());
        }
    }
}
