use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Component, Path, PathBuf},
    sync::OnceLock,
};

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        ParseError, ParseErrorKind, ScriptFile, StringFile, canonical_key,
        file_scanner::{SourceKind, scan_files},
        parsers::{dialogue, strings},
    },
};

/// Everything parsed from one project, keyed by canonical file key.
#[derive(Debug, Default)]
pub struct ParsedProject {
    pub scripts: BTreeMap<String, ScriptFile>,
    pub strings: BTreeMap<String, StringFile>,
    /// Files that failed to parse, in path order.
    pub failures: Vec<ParseError>,
}

impl ParsedProject {
    /// String table paired with a script, by canonical key.
    pub fn paired_strings(&self, key: &str) -> Option<&StringFile> {
        self.strings.get(key)
    }

    /// String tables that no script pairs with.
    pub fn unpaired_strings(&self) -> impl Iterator<Item = &StringFile> {
        self.strings
            .values()
            .filter(|file| !self.scripts.contains_key(&file.key))
    }

    pub fn file_count(&self) -> usize {
        self.scripts.len() + self.strings.len() + self.failures.len()
    }
}

/// Project-wide state shared by the commands.
///
/// Configuration is merged at construction (CLI args > config file >
/// defaults) and both roots are scanned eagerly. Parsing happens on the first
/// call to [`ProjectContext::parsed`].
pub struct ProjectContext {
    /// Merged configuration.
    pub config: Config,
    /// Project directory (`--path`), used to resolve relative config paths.
    pub root_dir: PathBuf,
    pub dialog_dir: PathBuf,
    pub strings_dir: PathBuf,
    pub script_paths: Vec<PathBuf>,
    pub string_paths: Vec<PathBuf>,
    pub verbose: bool,

    parsed: OnceLock<ParsedProject>,
}

impl ProjectContext {
    /// Load configuration and discover the project's files.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid, a root directory does
    /// not exist, or two files of one family share a canonical key.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let mut config = config_result.config;

        if let Some(ref dialog_root) = common_args.dialog_root {
            config.dialog_root = dialog_root.to_string_lossy().to_string();
        }
        if let Some(ref strings_root) = common_args.strings_root {
            config.strings_root = strings_root.to_string_lossy().to_string();
        }
        if let Some(ref language) = common_args.language {
            config.language = Some(language.clone());
        }

        let dialog_dir = resolve_dir(&root_dir, Path::new(&config.dialog_root));
        let strings_dir = resolve_dir(&root_dir, &config.strings_dir());
        for (dir, what) in [(&dialog_dir, "dialogue"), (&strings_dir, "string table")] {
            if !dir.is_dir() {
                bail!("{} directory not found: {}", what, dir.display());
            }
        }

        let (scripts, tables) = rayon::join(
            || {
                scan_files(
                    &dialog_dir,
                    SourceKind::Dialogue,
                    config.recursive,
                    &config.ignores,
                    verbose,
                )
            },
            || {
                scan_files(
                    &strings_dir,
                    SourceKind::Strings,
                    config.recursive,
                    &config.ignores,
                    verbose,
                )
            },
        );

        let skipped = scripts.skipped_count + tables.skipped_count;
        if skipped > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                skipped,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        ensure_unique_keys(&scripts.files, SourceKind::Dialogue)?;
        ensure_unique_keys(&tables.files, SourceKind::Strings)?;

        Ok(Self {
            config,
            root_dir,
            dialog_dir,
            strings_dir,
            script_paths: scripts.files,
            string_paths: tables.files,
            verbose,
            parsed: OnceLock::new(),
        })
    }

    /// Output directory, resolved against the project directory.
    pub fn output_dir(&self) -> PathBuf {
        resolve_dir(&self.root_dir, Path::new(&self.config.output_dir))
    }

    /// Parse every discovered file (lazy, parallel).
    ///
    /// Each file is parsed independently; a failure is recorded and never
    /// affects the other files.
    pub fn parsed(&self) -> &ParsedProject {
        self.parsed.get_or_init(|| {
            let (script_results, string_results) = rayon::join(
                || {
                    self.script_paths
                        .par_iter()
                        .map(|path| {
                            let result = open(path).and_then(|(reader, name)| {
                                dialogue::parse_reader(reader, &name)
                            });
                            (path, result)
                        })
                        .collect::<Vec<_>>()
                },
                || {
                    self.string_paths
                        .par_iter()
                        .map(|path| {
                            let result = open(path)
                                .and_then(|(reader, name)| strings::parse_reader(reader, &name));
                            (path, result)
                        })
                        .collect::<Vec<_>>()
                },
            );

            let mut project = ParsedProject::default();
            for (path, result) in script_results {
                match result {
                    Ok(occurrences) => {
                        let file = ScriptFile::new(path.clone(), occurrences);
                        project.scripts.insert(file.key.clone(), file);
                    }
                    Err(err) => self.record_failure(&mut project, err),
                }
            }
            for (path, result) in string_results {
                match result {
                    Ok(table) => {
                        let file = StringFile::new(path.clone(), table);
                        project.strings.insert(file.key.clone(), file);
                    }
                    Err(err) => self.record_failure(&mut project, err),
                }
            }
            project.failures.sort_by(|a, b| a.file.cmp(&b.file));
            project
        })
    }

    fn record_failure(&self, project: &mut ParsedProject, err: ParseError) {
        if self.verbose {
            eprintln!("Warning: {}", err);
        }
        log::debug!("parse failure ({}): {}", err.category(), err);
        project.failures.push(err);
    }
}

fn open(path: &Path) -> Result<(BufReader<File>, String), ParseError> {
    let name = path.display().to_string();
    match File::open(path) {
        Ok(file) => Ok((BufReader::new(file), name)),
        Err(e) => Err(ParseError::new(name, 0, ParseErrorKind::Read(e.to_string()))),
    }
}

/// Resolve a configured directory against the project directory.
fn resolve_dir(root_dir: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        dir.to_path_buf()
    } else {
        let rel = dir.strip_prefix(Path::new(".")).unwrap_or(dir);
        root_dir.join(rel)
    }
}

fn ensure_unique_keys(files: &[PathBuf], kind: SourceKind) -> Result<()> {
    let mut seen: BTreeMap<String, &PathBuf> = BTreeMap::new();
    for path in files {
        let key = canonical_key(path);
        if let Some(first) = seen.insert(key.clone(), path) {
            bail!(
                "two {} files map to '{}': {} and {}",
                kind.label(),
                key,
                first.display(),
                path.display()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use super::*;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn args(dir: &TempDir) -> CommonArgs {
        CommonArgs {
            path: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_context_is_shareable_across_threads() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<ProjectContext>();
    }

    #[test]
    fn test_resolve_dir() {
        assert_eq!(
            resolve_dir(Path::new("."), Path::new("./csv")),
            PathBuf::from("./csv")
        );
        assert_eq!(
            resolve_dir(Path::new("mod"), Path::new("./csv")),
            PathBuf::from("mod").join("csv")
        );
        assert_eq!(
            resolve_dir(Path::new("mod"), Path::new("/abs")),
            PathBuf::from("/abs")
        );
    }

    #[test]
    fn test_parses_and_pairs_files() {
        let dir = project(&[
            (
                "AC#TEST.d",
                "BEGIN AC#TEST\nIF ~~ THEN BEGIN S\nSAY @1\nEND\n",
            ),
            ("ac#test.tra", "@1 = ~Hello~\n"),
            ("extra.tra", "@7 = ~Spare~\n"),
        ]);
        let ctx = ProjectContext::new(&args(&dir)).unwrap();
        let parsed = ctx.parsed();

        assert!(parsed.failures.is_empty());
        assert_eq!(parsed.scripts.len(), 1);
        assert!(parsed.paired_strings("ac#test").is_some());
        let unpaired: Vec<&str> = parsed.unpaired_strings().map(|f| f.key.as_str()).collect();
        assert_eq!(unpaired, vec!["extra"]);
        assert_eq!(parsed.file_count(), 3);
    }

    #[test]
    fn test_failures_do_not_affect_other_files() {
        let dir = project(&[
            ("good.tra", "@1 = ~ok~\n"),
            ("bad.tra", "@1 = ~a~\n@1 = ~b~\n"),
        ]);
        let ctx = ProjectContext::new(&args(&dir)).unwrap();
        let parsed = ctx.parsed();

        assert_eq!(parsed.strings.len(), 1);
        assert_eq!(parsed.failures.len(), 1);
        assert_eq!(parsed.failures[0].line, 2);
        assert!(parsed.failures[0].file.ends_with("bad.tra"));
    }

    #[test]
    fn test_language_subdirectory() {
        let dir = project(&[("tra/english/a.tra", "@1 = ~x~\n")]);
        let common = CommonArgs {
            path: Some(dir.path().to_path_buf()),
            strings_root: Some(PathBuf::from("tra")),
            language: Some("english".to_string()),
            ..Default::default()
        };
        let ctx = ProjectContext::new(&common).unwrap();
        assert_eq!(ctx.string_paths.len(), 1);
    }

    #[test]
    fn test_duplicate_keys_fail() {
        let dir = project(&[("a.tra", ""), ("sub/A.TRA", "")]);
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "recursive": true }"#,
        )
        .unwrap();

        let err = ProjectContext::new(&args(&dir)).err().unwrap();
        assert!(err.to_string().contains("map to 'a'"));
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = project(&[]);
        let common = CommonArgs {
            path: Some(dir.path().to_path_buf()),
            dialog_root: Some(PathBuf::from("nope")),
            ..Default::default()
        };
        let err = ProjectContext::new(&common).err().unwrap();
        assert!(err.to_string().contains("dialogue directory not found"));
    }
}
