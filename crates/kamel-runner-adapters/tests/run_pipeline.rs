//! Full run pipeline over a real module tree, wired with the production
//! adapters. Only the launcher is swapped for a recorder in most tests.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use kamel_runner_adapters::{
    BundledSettings, MemoryScanner, PomDescriptor, PropertiesFile, ShellLauncher, WalkDirScanner,
};
use kamel_runner_core::prelude::*;
use tempfile::TempDir;

const POM: &str = r#"<project>
  <groupId>com.acme</groupId>
  <artifactId>orders</artifactId>
  <version>1.0</version>
  <dependencies>
    <dependency>
      <groupId>org.apache.camel</groupId>
      <artifactId>camel-core</artifactId>
      <version>4.4.0</version>
    </dependency>
    <dependency>
      <groupId>io.quarkus</groupId>
      <artifactId>quarkus-core</artifactId>
      <version>3.8.0</version>
    </dependency>
    <dependency>
      <groupId>org.projectlombok</groupId>
      <artifactId>lombok</artifactId>
      <version>1.18.30</version>
    </dependency>
    <dependency>
      <groupId>${project.groupId}</groupId>
      <artifactId>orders-model</artifactId>
      <version>${project.version}</version>
    </dependency>
  </dependencies>
</project>"#;

#[derive(Clone, Default)]
struct RecordingLauncher {
    calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl ProcessLauncher for RecordingLauncher {
    fn launch(&self, command: &AssembledCommand, working_dir: &Path) -> RunnerResult<LaunchOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), working_dir.to_path_buf()));
        Ok(LaunchOutcome {
            exit_code: Some(0),
            ..LaunchOutcome::default()
        })
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `<tmp>/orders` next to `<tmp>/generics`.
fn workspace() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let module = temp.path().join("orders");

    write(&module, "pom.xml", POM);
    write(&module, "src/main/resources/application.properties", "camel.main.name=orders\n");
    write(&module, "src/main/resources/api/doc/orders.yaml", "openapi: 3.0.0\n");
    write(&module, "src/main/resources/mapping.json", "{}");
    write(&module, "src/main/resources/notes.txt", "ignored");
    write(&module, "src/main/java/com/acme/OrdersConnector.java", "");
    write(&module, "src/main/java/com/acme/Helper.java", "");

    let generics = temp.path().join("generics");
    write(&generics, "src/main/resources/shared.json", "{}");
    write(&generics, "src/main/java/com/acme/Base.java", "");

    (temp, module)
}

fn service(defaults: &Path, launcher: RecordingLauncher) -> RunService {
    RunService::new(
        Box::new(WalkDirScanner::new().sorted(true)),
        Box::new(BundledSettings::new().with_defaults_file(defaults)),
        Box::new(PomDescriptor::new()),
        Box::new(PropertiesFile::new()),
        Box::new(launcher),
    )
}

fn defaults_file(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("defaults.json");
    fs::write(
        &path,
        r#"{"configs":["--logs"],"traits":{"logging.level":"INFO"}}"#,
    )
    .unwrap();
    path
}

#[test]
fn assembles_full_command_in_fixed_order() {
    let (temp, module) = workspace();
    let defaults = defaults_file(&temp);
    let request = RunRequest::new(&module).overrides(
        SettingsOverrides::new()
            .config("verbose")
            .trait_value("logging.level", "DEBUG"),
    );

    let command = service(&defaults, RecordingLauncher::default())
        .assemble(&request)
        .unwrap();

    assert_eq!(
        command.as_str(),
        "kamel run \\\n\
         --open-api file:./src/main/resources/api/doc/orders.yaml \\\n\
         --resource=file:./src/main/resources/mapping.json \\\n\
         --resource=file:../generics/src/main/resources/shared.json \\\n\
         --logs \\\n\
         --verbose \\\n\
         --trait logging.level=DEBUG \\\n\
         --property camel.main.name=orders \\\n\
         --dependency mvn:com.acme:orders-model:1.0 \\\n\
         ./src/main/java/com/acme/OrdersConnector.java\n\
         ../generics/src/main/java/com/acme/Base.java"
    );
}

/// `path` spelled relative to the working directory, through `..` hops.
#[cfg(unix)]
fn relative_to_working_dir(path: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap();
    let mut relative: PathBuf = cwd.components().skip(1).map(|_| "..").collect();
    relative.push(path.strip_prefix("/").unwrap());
    relative
}

#[cfg(unix)]
#[test]
fn relative_module_dir_assembles_same_command() {
    let (temp, module) = workspace();
    let defaults = defaults_file(&temp);
    let svc = service(&defaults, RecordingLauncher::default());

    let relative = relative_to_working_dir(&module);
    assert!(relative.is_relative());

    let expected = svc.assemble(&RunRequest::new(&module)).unwrap();
    let actual = svc.assemble(&RunRequest::new(&relative)).unwrap();

    assert_eq!(actual.as_str(), expected.as_str());
    assert!(actual.as_str().contains("--open-api file:./src/main/resources/api/doc/orders.yaml"));
    assert!(actual.as_str().contains("--resource=file:../generics/src/main/resources/shared.json"));
}

#[test]
fn arguments_follow_scanner_order() {
    let (temp, module) = workspace();
    let defaults = defaults_file(&temp);
    let generics = temp.path().join("generics");

    // Deliberately unsorted: the command keeps whatever order the scanner yields.
    let scanner = MemoryScanner::with_files([
        module.join("src/main/resources/mapping.json"),
        module.join("src/main/resources/api/doc/orders.yaml"),
        module.join("src/main/java/com/acme/ZetaConnector.java"),
        module.join("src/main/java/com/acme/AlphaConnector.java"),
        generics.join("src/main/resources/shared.json"),
    ]);
    let svc = RunService::new(
        Box::new(scanner),
        Box::new(BundledSettings::new().with_defaults_file(&defaults)),
        Box::new(PomDescriptor::new()),
        Box::new(PropertiesFile::new()),
        Box::new(RecordingLauncher::default()),
    );

    let command = svc.assemble(&RunRequest::new(&module)).unwrap();

    assert_eq!(
        command.as_str(),
        "kamel run \\\n\
         --resource=file:./src/main/resources/mapping.json \\\n\
         --open-api file:./src/main/resources/api/doc/orders.yaml \\\n\
         --resource=file:../generics/src/main/resources/shared.json \\\n\
         --logs \\\n\
         --trait logging.level=INFO \\\n\
         --property camel.main.name=orders \\\n\
         --dependency mvn:com.acme:orders-model:1.0 \\\n\
         ./src/main/java/com/acme/ZetaConnector.java\n\
         ./src/main/java/com/acme/AlphaConnector.java"
    );
}

#[test]
fn dev_variant_only_appends_flag() {
    let (temp, module) = workspace();
    let defaults = defaults_file(&temp);
    let svc = service(&defaults, RecordingLauncher::default());

    let run = svc.assemble(&RunRequest::new(&module)).unwrap();
    let dev = svc
        .assemble(&RunRequest::new(&module).variant(Variant::Dev))
        .unwrap();

    assert_eq!(dev.as_str(), format!("{} --dev", run.as_str()));
}

#[test]
fn run_launches_in_module_dir() {
    let (temp, module) = workspace();
    let defaults = defaults_file(&temp);
    let launcher = RecordingLauncher::default();

    let report = service(&defaults, launcher.clone())
        .run(&RunRequest::new(&module))
        .unwrap();

    let calls = launcher.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, report.command.as_str());
    assert_eq!(calls[0].1, module);
    assert!(report.outcome.success());
}

#[test]
fn missing_properties_file_fails_before_launch() {
    let (temp, module) = workspace();
    fs::remove_file(module.join("src/main/resources/application.properties")).unwrap();
    let defaults = defaults_file(&temp);
    let launcher = RecordingLauncher::default();

    let err = service(&defaults, launcher.clone())
        .run(&RunRequest::new(&module))
        .unwrap_err();

    assert!(err.is_pre_launch());
    assert!(launcher.calls.lock().unwrap().is_empty());
}

#[test]
fn module_without_generics_sibling_still_runs() {
    let temp = TempDir::new().unwrap();
    let module = temp.path().join("solo");
    write(&module, "src/main/resources/application.properties", "");
    write(&module, "src/main/resources/routes.json", "{}");
    let defaults = defaults_file(&temp);

    let command = service(&defaults, RecordingLauncher::default())
        .assemble(&RunRequest::new(&module))
        .unwrap();

    assert_eq!(
        command.as_str(),
        "kamel run \\\n\
         --resource=file:./src/main/resources/routes.json \\\n\
         --logs \\\n\
         --trait logging.level=INFO \\"
    );
}

#[cfg(unix)]
#[test]
fn shell_launcher_runs_assembled_command() {
    let temp = TempDir::new().unwrap();
    let module = temp.path().join("echoer");
    write(&module, "src/main/resources/application.properties", "greeting=hi\n");
    let defaults = defaults_file(&temp);

    let svc = RunService::new(
        Box::new(WalkDirScanner::new().sorted(true)),
        Box::new(BundledSettings::new().with_defaults_file(&defaults)),
        Box::new(PomDescriptor::new()),
        Box::new(PropertiesFile::new()),
        Box::new(ShellLauncher::new()),
    );
    let report = svc
        .run(&RunRequest::new(&module).runtime("echo"))
        .unwrap();

    assert!(report.outcome.success());
    assert_eq!(report.outcome.stdout_lines, 1);
}
