//! Tests for version mirroring between manifests.

#[cfg(test)]
mod tests {
    use crate::mirror::ModuleMirror;
    use crate::SectionKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const ROOT_GO_MOD: &str = "module gitlab.com/example/mainnet

go 1.22

require (
	github.com/cosmos/cosmos-sdk v0.50.9
	github.com/rs/zerolog v1.32.0
)

replace (
	github.com/cosmos/cosmos-sdk => github.com/example/cosmos-sdk v0.50.9-fork
)
";

    const SIM_GO_MOD: &str = "module gitlab.com/example/mainnet/simulation

go 1.22

require (
	github.com/cosmos/cosmos-sdk v0.47.0
	github.com/google/uuid v1.6.0
)

replace (
	github.com/cosmos/cosmos-sdk => github.com/example/cosmos-sdk v0.47.0-fork
)
";

    fn create_module_pair(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
        let source = temp_dir.path().join("go.mod");
        fs::write(&source, ROOT_GO_MOD).unwrap();

        let sim_dir = temp_dir.path().join("test/simulation");
        fs::create_dir_all(&sim_dir).unwrap();
        let target = sim_dir.join("go.mod");
        fs::write(&target, SIM_GO_MOD).unwrap();

        (source, target)
    }

    #[test]
    fn test_mirror_updates_matching_entries() {
        let temp_dir = TempDir::new().unwrap();
        let (source, target) = create_module_pair(&temp_dir);

        let report = ModuleMirror::new(&source, &target).mirror(false).unwrap();

        assert_eq!(report.changes.len(), 2);
        assert_eq!(report.unchanged, 1);
        assert!(!report.dry_run);

        let content = fs::read_to_string(&target).unwrap();
        assert!(content.contains("\tgithub.com/cosmos/cosmos-sdk v0.50.9\n"));
        assert!(content.contains("\tgithub.com/google/uuid v1.6.0\n"));
        assert!(content.contains("=> github.com/example/cosmos-sdk v0.50.9-fork"));
    }

    #[test]
    fn test_mirror_preserves_structure() {
        let temp_dir = TempDir::new().unwrap();
        let (source, target) = create_module_pair(&temp_dir);

        ModuleMirror::new(&source, &target).mirror(false).unwrap();

        let before: Vec<&str> = SIM_GO_MOD.lines().collect();
        let content = fs::read_to_string(&target).unwrap();
        let after: Vec<&str> = content.lines().collect();

        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            // Headers, blanks, and delimiters keep their exact position
            if b.starts_with("require") || b.starts_with("replace") || *b == ")" || b.is_empty() {
                assert_eq!(b, a);
            }
        }
    }

    #[test]
    fn test_mirror_dry_run_leaves_target_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let (source, target) = create_module_pair(&temp_dir);

        let report = ModuleMirror::new(&source, &target).mirror(true).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.changes.len(), 2);
        assert_eq!(fs::read_to_string(&target).unwrap(), SIM_GO_MOD);
    }

    #[test]
    fn test_mirror_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let (source, target) = create_module_pair(&temp_dir);
        let mirror = ModuleMirror::new(&source, &target);

        mirror.mirror(false).unwrap();
        let first = fs::read_to_string(&target).unwrap();

        let report = mirror.mirror(false).unwrap();
        let second = fs::read_to_string(&target).unwrap();

        assert!(report.changes.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_check_reports_drift() {
        let temp_dir = TempDir::new().unwrap();
        let (source, target) = create_module_pair(&temp_dir);

        let report = ModuleMirror::new(&source, &target).check().unwrap();

        assert!(report.has_drift());
        assert_eq!(report.total_entries, 3);
        assert_eq!(report.drifts.len(), 2);

        let require_drift = report
            .drifts
            .iter()
            .find(|d| d.section == SectionKind::Require)
            .unwrap();
        assert_eq!(require_drift.module, "github.com/cosmos/cosmos-sdk");
        assert_eq!(require_drift.found, "v0.47.0");
        assert_eq!(require_drift.expected, "v0.50.9");

        // check is read-only
        assert_eq!(fs::read_to_string(&target).unwrap(), SIM_GO_MOD);
    }

    #[test]
    fn test_check_clean_after_mirror() {
        let temp_dir = TempDir::new().unwrap();
        let (source, target) = create_module_pair(&temp_dir);
        let mirror = ModuleMirror::new(&source, &target);

        mirror.mirror(false).unwrap();
        let report = mirror.check().unwrap();

        assert!(!report.has_drift());
    }

    #[test]
    fn test_source_without_replace_section_passes_target_through() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("go.mod");
        fs::write(
            &source,
            "require (
	github.com/cosmos/cosmos-sdk v0.50.9
)
",
        )
        .unwrap();

        let target = temp_dir.path().join("sim.go.mod");
        fs::write(&target, SIM_GO_MOD).unwrap();

        ModuleMirror::new(&source, &target).mirror(false).unwrap();

        let content = fs::read_to_string(&target).unwrap();
        assert!(content.contains("=> github.com/example/cosmos-sdk v0.47.0-fork"));
    }

    #[test]
    fn test_malformed_target_aborts_without_write() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("go.mod");
        fs::write(&source, ROOT_GO_MOD).unwrap();

        let target = temp_dir.path().join("sim.go.mod");
        let broken = "require (
	github.com/cosmos/cosmos-sdk
)
";
        fs::write(&target, broken).unwrap();

        let err = ModuleMirror::new(&source, &target).mirror(false).unwrap_err();

        assert!(format!("{:#}", err).contains("Malformed require entry"));
        assert_eq!(fs::read_to_string(&target).unwrap(), broken);
    }

    #[test]
    fn test_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("sim.go.mod");
        fs::write(&target, SIM_GO_MOD).unwrap();

        let err = ModuleMirror::new(temp_dir.path().join("go.mod"), &target)
            .mirror(false)
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to read"));
    }
}
