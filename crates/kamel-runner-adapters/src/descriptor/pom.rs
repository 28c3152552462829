//! Maven `pom.xml` reader.
//!
//! Only the module's own descriptor is read; parent POMs and imported BOMs
//! are not resolved. Versions missing from a `<dependency>` are looked up in
//! the same file's `<dependencyManagement>`, and `${...}` placeholders are
//! interpolated from `<properties>` and the project coordinates.

use std::{collections::HashMap, fs, io, path::Path};

use roxmltree::{Document, Node};
use tracing::{debug, instrument, warn};

use kamel_runner_core::{
    application::{ApplicationError, ports::DescriptorReader},
    domain::Dependency,
    error::RunnerResult,
};

pub const POM_FILE: &str = "pom.xml";

/// Reads declared dependencies from `<module>/pom.xml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PomDescriptor;

impl PomDescriptor {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorReader for PomDescriptor {
    #[instrument(skip(self), fields(module = %module_dir.display()))]
    fn dependencies(&self, module_dir: &Path) -> RunnerResult<Vec<Dependency>> {
        let path = module_dir.join(POM_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no pom.xml, no dependencies");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(ApplicationError::DescriptorError {
                    path,
                    reason: e.to_string(),
                }
                .into());
            }
        };

        parse_dependencies(&content).map_err(|reason| {
            ApplicationError::DescriptorError {
                path: path.clone(),
                reason,
            }
            .into()
        })
    }
}

/// Parse the project-level `<dependencies>` of a POM document.
pub fn parse_dependencies(content: &str) -> Result<Vec<Dependency>, String> {
    let doc = Document::parse(content).map_err(|e| e.to_string())?;
    let project = doc.root_element();
    if !project.has_tag_name("project") {
        return Err(format!(
            "root element is <{}>, expected <project>",
            project.tag_name().name()
        ));
    }

    let properties = collect_properties(project);
    let managed = child(project, "dependencyManagement")
        .and_then(|dm| child(dm, "dependencies"))
        .map(|deps| dependency_nodes(deps).collect::<Vec<_>>())
        .unwrap_or_default();

    let Some(dependencies) = child(project, "dependencies") else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for node in dependency_nodes(dependencies) {
        let (Some(group_id), Some(artifact_id)) =
            (child_text(node, "groupId"), child_text(node, "artifactId"))
        else {
            warn!("dependency without groupId/artifactId skipped");
            continue;
        };

        let version = child_text(node, "version")
            .or_else(|| {
                managed
                    .iter()
                    .find(|m| {
                        child_text(**m, "groupId") == Some(group_id)
                            && child_text(**m, "artifactId") == Some(artifact_id)
                    })
                    .and_then(|m| child_text(*m, "version"))
            })
            .unwrap_or_default();

        out.push(Dependency::new(
            interpolate(group_id, &properties),
            interpolate(artifact_id, &properties),
            interpolate(version, &properties),
        ));
    }

    debug!(count = out.len(), "dependencies parsed");
    Ok(out)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(name))
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name)
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn dependency_nodes<'a, 'input>(
    dependencies: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    dependencies
        .children()
        .filter(|c| c.has_tag_name("dependency"))
}

/// `<properties>` plus the implicit `project.*` values.
fn collect_properties(project: Node<'_, '_>) -> HashMap<String, String> {
    let mut props = HashMap::new();

    if let Some(properties) = child(project, "properties") {
        for prop in properties.children().filter(Node::is_element) {
            let value = prop.text().map(str::trim).unwrap_or_default();
            props.insert(prop.tag_name().name().to_string(), value.to_string());
        }
    }

    let parent = child(project, "parent");
    let parent_version = parent.and_then(|p| child_text(p, "version"));
    let parent_group = parent.and_then(|p| child_text(p, "groupId"));

    if let Some(version) = child_text(project, "version").or(parent_version) {
        props.insert("project.version".into(), version.into());
    }
    if let Some(group) = child_text(project, "groupId").or(parent_group) {
        props.insert("project.groupId".into(), group.into());
    }
    if let Some(artifact) = child_text(project, "artifactId") {
        props.insert("project.artifactId".into(), artifact.into());
    }
    if let Some(version) = parent_version {
        props.insert("project.parent.version".into(), version.into());
    }

    props
}

/// Replace `${name}` with its property value; unknown names stay literal.
fn interpolate(value: &str, properties: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match properties.get(name) {
                    Some(resolved) => out.push_str(resolved),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kamel_runner_core::error::ErrorCategory;
    use tempfile::TempDir;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>com.example</groupId>
    <artifactId>integrations</artifactId>
    <version>2.1.0</version>
  </parent>
  <artifactId>orders</artifactId>
  <properties>
    <camel.version>4.4.0</camel.version>
    <model.version>1.3.0</model.version>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>com.example</groupId>
        <artifactId>audit</artifactId>
        <version>0.9.1</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>org.apache.camel</groupId>
      <artifactId>camel-core</artifactId>
      <version>${camel.version}</version>
    </dependency>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>orders-model</artifactId>
      <version>${model.version}</version>
    </dependency>
    <dependency>
      <groupId>${project.groupId}</groupId>
      <artifactId>shared</artifactId>
      <version>${project.version}</version>
    </dependency>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>audit</artifactId>
    </dependency>
  </dependencies>
  <build>
    <plugins>
      <plugin>
        <dependencies>
          <dependency>
            <groupId>com.example</groupId>
            <artifactId>plugin-only</artifactId>
            <version>1</version>
          </dependency>
        </dependencies>
      </plugin>
    </plugins>
  </build>
</project>"#;

    #[test]
    fn parses_project_dependencies_only() {
        let deps = parse_dependencies(POM).unwrap();
        let coords: Vec<_> = deps.iter().map(Dependency::coordinate).collect();
        assert_eq!(
            coords,
            vec![
                "mvn:org.apache.camel:camel-core:4.4.0",
                "mvn:com.example:orders-model:1.3.0",
                "mvn:com.example:shared:2.1.0",
                "mvn:com.example:audit:0.9.1",
            ]
        );
    }

    #[test]
    fn unknown_placeholder_stays_literal() {
        let props = HashMap::from([("a".to_string(), "1".to_string())]);
        assert_eq!(interpolate("${a}-${b}", &props), "1-${b}");
        assert_eq!(interpolate("x${unterminated", &props), "x${unterminated");
    }

    #[test]
    fn missing_pom_means_no_dependencies() {
        let temp = TempDir::new().unwrap();
        assert!(PomDescriptor::new().dependencies(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn malformed_pom_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(POM_FILE), "<project><dependencies>").unwrap();
        let err = PomDescriptor::new().dependencies(temp.path()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn wrong_root_element_is_rejected() {
        assert!(parse_dependencies("<settings/>").is_err());
    }

    #[test]
    fn reads_from_module_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(POM_FILE), POM).unwrap();
        let deps = PomDescriptor::new().dependencies(temp.path()).unwrap();
        assert_eq!(deps.len(), 4);
    }
}
