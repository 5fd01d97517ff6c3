//! Contract Test: Section Validation
//!
//! Constraints verified:
//! - Deprecated `alias` is migrated into `hostname` when unambiguous
//! - Each section-fatal condition is reported with its section and option
//! - One rejected section never hides the problems of another
//! - Sections failing while their records are built are reported the same way
//! - A rejected load produces no registry
//!
//! If this test fails, bad configuration may reach the update engine.

mod common;

use common::*;
use ddns_config::limits::{NAME_CAPACITY, PATH_CAPACITY};
use ddns_config::{ConfigLoader, Error, PluginRegistry, ProviderPlugin, SectionError, SectionKind};

#[test]
fn alias_only_section_is_migrated() {
    let plugins = test_plugins();
    let text = r#"
        [[provider]]
        name = "dyndns.org"
        username = "u"
        password = "p"
        alias = ["a.dyndns.org", "b.dyndns.org"]
    "#;

    let loaded = ConfigLoader::new(&plugins).load_str(text).expect("alias migrates");
    let record = loaded.providers.get(0).expect("one record");

    assert_eq!(record.hostnames().as_slice(), &["a.dyndns.org", "b.dyndns.org"]);
}

#[test]
fn alias_and_hostname_together_are_rejected() {
    let plugins = test_plugins();
    let text = r#"
        [[provider]]
        name = "dyndns.org"
        username = "u"
        password = "p"
        hostname = "h.dyndns.org"
        alias = "a.dyndns.org"
    "#;

    let err = ConfigLoader::new(&plugins).load_str(text).unwrap_err();
    let diagnostic = &err.diagnostics()[0];

    assert_eq!(diagnostic.error, SectionError::AliasConflict);
    assert_eq!(diagnostic.field, Some("alias"));
    assert_eq!(diagnostic.section.title.as_deref(), Some("dyndns.org"));
}

#[test]
fn missing_hostnames_rejected() {
    let plugins = test_plugins();
    let text = r#"
        [[provider]]
        name = "dyndns.org"
        username = "u"
        password = "p"
        hostname = []
    "#;

    let err = ConfigLoader::new(&plugins).load_str(text).unwrap_err();
    assert_eq!(
        err.diagnostics()[0].error,
        SectionError::MissingHostnames {
            provider: "dyndns.org".to_string()
        }
    );
}

#[test]
fn overlong_hostname_rejected() {
    let plugins = test_plugins();
    let hostname = "h".repeat(NAME_CAPACITY + 1);
    let text = format!(
        "[[provider]]\n\
         name = \"dyndns.org\"\n\
         username = \"u\"\n\
         password = \"p\"\n\
         hostname = \"{hostname}\"\n"
    );

    let err = ConfigLoader::new(&plugins).load_str(&text).unwrap_err();
    assert!(matches!(
        &err.diagnostics()[0].error,
        SectionError::HostnameTooLong { hostname: rejected, .. } if rejected == &hostname
    ));
}

#[test]
fn unknown_provider_rejected() {
    let plugins = test_plugins();
    let text = r#"
        [[provider]]
        name = "example.invalid"
        username = "u"
        password = "p"
        hostname = "h.example.invalid"
    "#;

    let err = ConfigLoader::new(&plugins).load_str(text).unwrap_err();
    assert_eq!(
        err.diagnostics()[0].error,
        SectionError::UnknownProvider("example.invalid".to_string())
    );
}

#[test]
fn custom_without_server_rejected() {
    let plugins = test_plugins();
    let text = r#"
        [[custom]]
        name = "home"
        hostname = "home.example.net"
        ddns-server = ""
    "#;

    let err = ConfigLoader::new(&plugins).load_str(text).unwrap_err();
    let diagnostic = &err.diagnostics()[0];

    assert_eq!(diagnostic.error, SectionError::MissingServer);
    assert_eq!(diagnostic.section.kind, SectionKind::Custom);
    assert_eq!(
        diagnostic.to_string(),
        "custom 'home' (ddns-server): Missing 'ddns-server' for custom DDNS provider"
    );
}

#[test]
fn custom_with_blank_server_host_rejected() {
    let plugins = test_plugins();

    for server in ["   ", ":8080", " :8080"] {
        let text = format!(
            "[[custom]]\n\
             name = \"home\"\n\
             hostname = \"home.example.net\"\n\
             ddns-server = \"{server}\"\n"
        );

        let err = ConfigLoader::new(&plugins).load_str(&text).unwrap_err();
        assert_eq!(err.diagnostics()[0].error, SectionError::MissingServer, "server {server:?}");
    }
}

#[test]
fn custom_needs_no_credentials() {
    let plugins = test_plugins();
    let text = r#"
        [[custom]]
        ddns-server = "update.example.net"
        hostname = "home.example.net"
    "#;

    let loaded = ConfigLoader::new(&plugins).load_str(text).expect("anonymous custom loads");
    let record = loaded.providers.get(0).expect("one record");

    // Untitled custom sections take the plugin name
    assert_eq!(record.name(), "custom");
    assert_eq!(record.credentials().username(), None);
}

#[test]
fn every_bad_section_reported_and_no_registry_returned() {
    let plugins = test_plugins();
    let text = format!(
        r#"
        [[provider]]
        username = "u"
        password = "p"
        hostname = "h.example.org"
        {DYNDNS_SECTION}
        [[provider]]
        name = "no-ip.com"
        username = "u"
        hostname = "h.no-ip.com"
        "#
    );

    let err = ConfigLoader::new(&plugins).load_str(&text).unwrap_err();
    let Error::Invalid { diagnostics } = err else {
        panic!("expected invalid configuration");
    };

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].error, SectionError::MissingName);
    assert_eq!(diagnostics[0].section.to_string(), "provider #1");
    assert_eq!(diagnostics[1].field, Some("password"));
    assert_eq!(diagnostics[1].section.to_string(), "provider 'no-ip.com'");
}

#[test]
fn build_failures_reported_for_every_section() {
    // Both plugins exist, so validation passes; their update paths cannot be stored
    let long_path = format!("/{}", "p".repeat(PATH_CAPACITY));
    let mut plugins = PluginRegistry::new();
    for service in ["first.example", "second.example"] {
        plugins.register(
            ProviderPlugin::new(format!("default@{service}"))
                .with_update(format!("members.{service}"), long_path.clone()),
        );
    }

    let text = r#"
        [[provider]]
        name = "first.example"
        username = "u"
        password = "p"
        hostname = "h.first.example"

        [[provider]]
        name = "second.example"
        username = "u"
        password = "p"
        hostname = "h.second.example"
    "#;

    let err = ConfigLoader::new(&plugins).load_str(text).unwrap_err();
    let Error::Invalid { diagnostics } = err else {
        panic!("expected invalid configuration");
    };

    let titles: Vec<Option<&str>> = diagnostics
        .iter()
        .map(|d| d.section.title.as_deref())
        .collect();
    assert_eq!(titles, vec![Some("first.example"), Some("second.example")]);

    for diagnostic in &diagnostics {
        assert_eq!(
            diagnostic.error,
            SectionError::ConfigOverflow {
                field: "ddns-path",
                len: PATH_CAPACITY + 1,
                capacity: PATH_CAPACITY,
            }
        );
        assert_eq!(diagnostic.field, Some("ddns-path"));
    }
}
