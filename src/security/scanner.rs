//! Secret scanner implementation

use std::fs;
use std::path::Path;

use anyhow::Result;

use super::rules::default_rules;
use super::{ScanStatus, SecretMatch, SecretRule, Severity};

/// Scanner over an in-memory rule list.
pub struct SecretScanner {
    rules: Vec<SecretRule>,
}

impl SecretScanner {
    /// Create a scanner with the built-in rule set.
    pub fn new() -> Result<Self> {
        Ok(Self { rules: default_rules()? })
    }

    /// Add a custom detection rule.
    pub fn add_rule(&mut self, rule: SecretRule) {
        self.rules.push(rule);
    }

    /// Scan a single file. An unreadable file yields an informational
    /// finding rather than an error; scanning always completes.
    pub fn scan_file(&self, path: &Path) -> Vec<SecretMatch> {
        let mut matches = Vec::new();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                matches.push(SecretMatch {
                    file_path: path.display().to_string(),
                    line_number: 0,
                    rule_name: "unreadable-file".to_string(),
                    message: format!("could not read file for scanning: {}", err),
                    severity: Severity::Info,
                });
                return matches;
            }
        };

        for (line_num, line) in content.lines().enumerate() {
            for rule in &self.rules {
                if rule.regex.is_match(line) {
                    matches.push(SecretMatch {
                        file_path: path.display().to_string(),
                        line_number: line_num + 1,
                        rule_name: rule.name.clone(),
                        message: rule.message.clone(),
                        severity: rule.severity,
                    });
                }
            }
        }

        matches.extend(check_permissions(path));
        matches
    }

    /// Scan multiple files, aggregating findings into an overall verdict.
    pub fn scan_paths(&self, paths: &[&Path]) -> (ScanStatus, Vec<SecretMatch>) {
        let mut all_matches = Vec::new();
        for path in paths {
            all_matches.extend(self.scan_file(path));
        }
        let status = if all_matches.is_empty() { ScanStatus::Pass } else { ScanStatus::Warn };
        (status, all_matches)
    }
}

/// Flag file modes more permissive than owner read/write plus world read
/// (0644). Credential-bearing files should not be group/world writable or
/// executable.
#[cfg(unix)]
fn check_permissions(path: &Path) -> Vec<SecretMatch> {
    use std::os::unix::fs::PermissionsExt;

    let Ok(metadata) = fs::metadata(path) else {
        return Vec::new();
    };
    let mode = metadata.permissions().mode() & 0o777;
    if mode & !0o644 != 0 {
        vec![SecretMatch {
            file_path: path.display().to_string(),
            line_number: 0,
            rule_name: "file-permissions".to_string(),
            message: format!("mode {:o} is more permissive than 644", mode),
            severity: Severity::Info,
        }]
    } else {
        Vec::new()
    }
}

#[cfg(not(unix))]
fn check_permissions(_path: &Path) -> Vec<SecretMatch> {
    Vec::new()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_600(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
        path
    }

    #[test]
    fn flags_leaked_appid_key() {
        let dir = TempDir::new().unwrap();
        let path = write_600(
            &dir,
            "environment.json",
            r#"{"values": [{"key": "appid", "value": "1234567890abcdef1234567890ab1234"}]}"#,
        );

        let scanner = SecretScanner::new().unwrap();
        let (status, matches) = scanner.scan_paths(&[&path]);
        assert_eq!(status, ScanStatus::Warn);
        assert!(matches.iter().any(|m| m.rule_name == "appid-hex-key"));
        assert_eq!(matches[0].line_number, 1);
    }

    #[test]
    fn clean_file_passes() {
        let dir = TempDir::new().unwrap();
        let path = write_600(&dir, "collection.json", r#"{"info": {"name": "weather"}}"#);

        let scanner = SecretScanner::new().unwrap();
        let (status, matches) = scanner.scan_paths(&[&path]);
        assert_eq!(status, ScanStatus::Pass, "unexpected findings: {:?}", matches);
    }

    #[test]
    fn world_writable_file_is_flagged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("environment.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o666)).unwrap();

        let scanner = SecretScanner::new().unwrap();
        let matches = scanner.scan_file(&path);
        assert!(matches.iter().any(|m| m.rule_name == "file-permissions"));
    }

    #[test]
    fn mode_644_is_acceptable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("collection.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let scanner = SecretScanner::new().unwrap();
        assert!(scanner.scan_file(&path).is_empty());
    }

    #[test]
    fn missing_file_degrades_to_informational_finding() {
        let scanner = SecretScanner::new().unwrap();
        let matches = scanner.scan_file(Path::new("/nonexistent/environment.json"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_name, "unreadable-file");
        assert_eq!(matches[0].severity, Severity::Info);
    }

    #[test]
    fn custom_rules_extend_the_set() {
        let dir = TempDir::new().unwrap();
        let path = write_600(&dir, "environment.json", "internal_token=XYZ-999");

        let mut scanner = SecretScanner::new().unwrap();
        scanner.add_rule(
            SecretRule::new("internal-token", r"XYZ-\d{3}", Severity::Critical, "internal token")
                .unwrap(),
        );
        let matches = scanner.scan_file(&path);
        assert!(matches.iter().any(|m| m.rule_name == "internal-token"));
    }
}
