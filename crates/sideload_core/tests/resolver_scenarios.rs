use sideload_core::{
    Diagnostics, LoadError, MemorySink, ModuleLoader, ResolverConfig,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

struct RecordingLoader {
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingLoader {
    fn new() -> (Self, Arc<Mutex<Vec<PathBuf>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl ModuleLoader for RecordingLoader {
    type Module = PathBuf;

    fn load(&self, path: &Path) -> Result<PathBuf, LoadError> {
        self.calls
            .lock()
            .expect("call log lock")
            .push(path.to_path_buf());
        Ok(path.to_path_buf())
    }
}

fn manifest_for(dir: &Path, allow: &[&str]) -> ResolverConfig {
    let names = allow
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let raw = format!(
        r#"{{"install_dir": "{}", "allow": [{names}]}}"#,
        dir.display()
    );
    ResolverConfig::from_json_str(&raw).expect("manifest parse")
}

fn deploy_module(dir: &Path, short_name: &str) -> PathBuf {
    let path = dir.join(format!("{short_name}.{}", std::env::consts::DLL_EXTENSION));
    std::fs::write(&path, b"stub module").expect("fixture module file");
    path
}

#[test]
fn allow_listed_request_resolves_to_deployed_module() {
    let dir = tempfile::tempdir().expect("temp dir");
    let deployed = deploy_module(dir.path(), "GitHub.Api");

    let config = manifest_for(dir.path(), &["GitHub.Api"]);
    let (loader, _calls) = RecordingLoader::new();
    let resolver = config
        .build_resolver(loader, Diagnostics::new())
        .expect("resolver build");

    let module = resolver
        .resolve("GitHub.Api")
        .expect("deployed allow-listed module should resolve");
    assert_eq!(module, deployed);
}

#[test]
fn foreign_module_request_yields_no_opinion_without_probing() {
    let dir = tempfile::tempdir().expect("temp dir");
    deploy_module(dir.path(), "Newtonsoft.Json");

    let config = manifest_for(dir.path(), &["GitHub.Api"]);
    let (loader, calls) = RecordingLoader::new();
    let resolver = config
        .build_resolver(loader, Diagnostics::new())
        .expect("resolver build");

    assert!(resolver.resolve("Newtonsoft.Json").is_none());
    assert!(calls.lock().expect("call log lock").is_empty());
}

#[test]
fn allow_listed_request_without_deployed_file_yields_no_opinion() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = manifest_for(dir.path(), &["GitHub.Api"]);
    let (loader, calls) = RecordingLoader::new();
    let resolver = config
        .build_resolver(loader, Diagnostics::new())
        .expect("resolver build");

    assert!(resolver.resolve("GitHub.Api").is_none());
    assert!(calls.lock().expect("call log lock").is_empty());
}

#[test]
fn requests_match_manifest_names_case_insensitively() {
    let dir = tempfile::tempdir().expect("temp dir");
    deploy_module(dir.path(), "github.app");

    let config = manifest_for(dir.path(), &["GitHub.App"]);
    let (loader, _calls) = RecordingLoader::new();
    let resolver = config
        .build_resolver(loader, Diagnostics::new())
        .expect("resolver build");

    assert!(resolver.resolve("github.app").is_some());
}

#[test]
fn versioned_identity_resolves_by_short_name() {
    let dir = tempfile::tempdir().expect("temp dir");
    let deployed = deploy_module(dir.path(), "GitHub.Exports");

    let config = manifest_for(dir.path(), &["GitHub.Exports", "GitHub.Api"]);
    let (loader, _calls) = RecordingLoader::new();
    let resolver = config
        .build_resolver(loader, Diagnostics::new())
        .expect("resolver build");

    let module = resolver
        .resolve("GitHub.Exports, Version=2.5.0.0, Culture=neutral, PublicKeyToken=null")
        .expect("any version of an extension-owned module should resolve");
    assert_eq!(module, deployed);
}

#[test]
fn manifest_loaded_from_install_dir_drives_resolution() {
    let dir = tempfile::tempdir().expect("temp dir");
    let deployed = deploy_module(dir.path(), "GitHub.UI");

    let manifest_path = dir.path().join("resolver.json");
    std::fs::write(
        &manifest_path,
        format!(
            r#"{{"install_dir": "{}", "allow": ["GitHub.UI"]}}"#,
            dir.path().display()
        ),
    )
    .expect("manifest fixture");

    let config = ResolverConfig::load(&manifest_path).expect("manifest load");
    let (loader, _calls) = RecordingLoader::new();
    let resolver = config
        .build_resolver(loader, Diagnostics::new())
        .expect("resolver build");

    assert_eq!(resolver.resolve("GitHub.UI.dll"), Some(deployed));
}

#[test]
fn successful_and_rejected_requests_emit_no_diagnostics() {
    let dir = tempfile::tempdir().expect("temp dir");
    deploy_module(dir.path(), "GitHub.Api");

    let sink = Arc::new(MemorySink::new());
    let config = manifest_for(dir.path(), &["GitHub.Api"]);
    let (loader, _calls) = RecordingLoader::new();
    let resolver = config
        .build_resolver(loader, Diagnostics::new().with_sink(sink.clone()))
        .expect("resolver build");

    assert!(resolver.resolve("GitHub.Api").is_some());
    assert!(resolver.resolve("Newtonsoft.Json").is_none());
    assert!(sink.is_empty());
}
