use std::path::Path;

use anyhow::Context;
use loot_filter_config::Config;
use loot_filter_engine::io::{
    export_filter, import_filter, load_workspace, read_filter_file, save_workspace,
    scan_filter_files, write_file,
};
use loot_filter_engine::{DecodeOptions, FilterWorkspace, LineMatching};

const USAGE: &str = "usage: loot-filter <decode|encode|check|normalize> <input> [output] [--strict]";
const STRICT_FLAG: &str = "--strict";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Decode,
    Encode,
    Check,
    Normalize,
}

pub fn parse_command(name: Option<&str>) -> Option<Command> {
    match name {
        Some("decode") => Some(Command::Decode),
        Some("encode") => Some(Command::Encode),
        Some("check") => Some(Command::Check),
        Some("normalize") => Some(Command::Normalize),
        _ => None,
    }
}

/// Runs one command and returns the process exit code.
///
/// `--strict` may appear anywhere and switches decoding to leading-token
/// matching, whatever the config says.
pub fn run_with_args(args: &[String], config: Option<&Config>) -> i32 {
    let (flags, positional): (Vec<&str>, Vec<&str>) = args
        .iter()
        .skip(1)
        .map(String::as_str)
        .partition(|arg| arg.starts_with("--"));

    let unknown_flag = flags.iter().any(|flag| *flag != STRICT_FLAG);
    let command = parse_command(positional.first().copied());
    let (false, Some(command), Some(input), None) = (
        unknown_flag,
        command,
        positional.get(1),
        positional.get(3),
    ) else {
        eprintln!("{USAGE}");
        return 2;
    };

    let input = Path::new(input);
    let output = positional.get(2).map(Path::new);
    let options = decode_options(config, flags.contains(&STRICT_FLAG));

    let result = match command {
        Command::Decode => handle_decode(input, output, &options).map(|()| 0),
        Command::Encode => handle_encode(input, output, config).map(|()| 0),
        Command::Check => handle_check(input, &options),
        Command::Normalize => handle_normalize(input, output, &options).map(|()| 0),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}

fn decode_options(config: Option<&Config>, strict: bool) -> DecodeOptions {
    let mut options = config.map(Config::decode_options).unwrap_or_default();
    if strict {
        options.line_matching = LineMatching::LeadingToken;
    }
    options
}

fn handle_decode(
    input: &Path,
    output: Option<&Path>,
    options: &DecodeOptions,
) -> anyhow::Result<()> {
    let (workspace, _skipped) = import_filter(input, options)?;
    match output {
        Some(path) => save_workspace(path, &workspace)?,
        None => println!("{}", workspace.to_json_pretty()?),
    }
    Ok(())
}

fn handle_encode(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Config>,
) -> anyhow::Result<()> {
    let workspace = load_workspace(input)?;
    match (output, config) {
        (Some(path), _) => write_file(path, &workspace.to_filter_text())?,
        (None, Some(config)) => {
            let path = export_filter(&config.workspace_path, &workspace)?;
            println!("{}", path.display());
        }
        (None, None) => println!("{}", workspace.to_filter_text()),
    }
    Ok(())
}

/// Prints every dropped paragraph and block issue; exit code 1 if any.
fn handle_check(input: &Path, options: &DecodeOptions) -> anyhow::Result<i32> {
    let files = if input.is_dir() {
        scan_filter_files(input)?
    } else {
        vec![input.to_path_buf()]
    };

    let mut problems = 0;
    for file in &files {
        problems += check_file(file, options)
            .with_context(|| format!("checking {}", file.display()))?;
    }

    println!("{} file(s) checked, {problems} problem(s)", files.len());
    Ok(if problems == 0 { 0 } else { 1 })
}

fn check_file(file: &Path, options: &DecodeOptions) -> anyhow::Result<usize> {
    let (workspace, skipped) = import_filter(file, options)?;
    let mut problems = skipped.len();

    for paragraph in &skipped {
        println!(
            "{}: paragraph {} ({:?}) dropped: {}",
            file.display(),
            paragraph.index,
            paragraph.first_line,
            paragraph.reason
        );
    }

    for (index, block) in workspace.blocks.iter().enumerate() {
        for issue in block.validate(options.line_matching) {
            problems += 1;
            println!(
                "{}: block {index} ({:?}): {issue}",
                file.display(),
                block.name
            );
        }
    }

    Ok(problems)
}

fn handle_normalize(
    input: &Path,
    output: Option<&Path>,
    options: &DecodeOptions,
) -> anyhow::Result<()> {
    let text = read_filter_file(input)?;
    let (workspace, skipped) = FilterWorkspace::from_filter_text("", &text, options);
    if !skipped.is_empty() {
        log::warn!(
            "Normalizing {} dropped {} paragraph(s)",
            input.display(),
            skipped.len()
        );
    }

    let normalized = workspace.to_filter_text();
    match output {
        Some(path) => write_file(path, &normalized)?,
        None => println!("{normalized}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("loot-filter")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn path_arg(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(Some("decode")), Some(Command::Decode));
        assert_eq!(parse_command(Some("encode")), Some(Command::Encode));
        assert_eq!(parse_command(Some("check")), Some(Command::Check));
        assert_eq!(parse_command(Some("normalize")), Some(Command::Normalize));
        assert_eq!(parse_command(Some("serve")), None);
        assert_eq!(parse_command(None), None);
    }

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(run_with_args(&args(&[]), None), 2);
        assert_eq!(run_with_args(&args(&["decode"]), None), 2);
        assert_eq!(run_with_args(&args(&["frobnicate", "in.filter"]), None), 2);
        assert_eq!(
            run_with_args(&args(&["decode", "in.filter", "--verbose"]), None),
            2
        );
        assert_eq!(run_with_args(&args(&["decode", "a", "b", "c"]), None), 2);
    }

    #[test]
    fn missing_input_exits_with_one() {
        let dir = TempDir::new().unwrap();
        let code = run_with_args(&args(&["normalize", &path_arg(&dir, "gone.filter")]), None);
        assert_eq!(code, 1);
    }

    #[test]
    fn strict_flag_overrides_config() {
        let config = Config {
            line_matching: LineMatching::Substring,
            ..Config::default()
        };

        assert_eq!(
            decode_options(Some(&config), true).line_matching,
            LineMatching::LeadingToken
        );
        assert_eq!(
            decode_options(Some(&config), false).line_matching,
            LineMatching::Substring
        );
        assert_eq!(
            decode_options(None, false).line_matching,
            LineMatching::Substring
        );
    }

    #[test]
    fn decode_then_encode_restores_filter() {
        let dir = TempDir::new().unwrap();
        let text = "# Currency\nShow\nClass == Stackable Currency\n\
                    Rarity = Normal Magic Rare Unique\nSetTextColor 255 0 0 255\n\
                    SetBackgroundColor 255 255 255 255\nSetBorderColor 255 0 0 255\n\
                    SetFontSize 32\n\n# Rest\nHide\nRarity = Normal Magic Rare Unique";
        let filter = write(&dir, "league.filter", text);
        let json = path_arg(&dir, "league.json");
        let back = path_arg(&dir, "league-copy.filter");

        assert_eq!(run_with_args(&args(&["decode", &filter, &json]), None), 0);
        let workspace = load_workspace(Path::new(&json)).unwrap();
        assert_eq!(workspace.filter_name, "league");
        assert_eq!(workspace.blocks.len(), 2);

        assert_eq!(run_with_args(&args(&["encode", &json, &back]), None), 0);
        assert_eq!(fs::read_to_string(&back).unwrap(), text);
    }

    #[test]
    fn encode_without_output_exports_into_workspace_path() {
        let dir = TempDir::new().unwrap();
        let workspace = FilterWorkspace::from_filter_text(
            "starter",
            "Show\nClass = Flask",
            &DecodeOptions::default(),
        )
        .0;
        let json = path_arg(&dir, "starter.json");
        save_workspace(Path::new(&json), &workspace).unwrap();
        let config = Config {
            workspace_path: dir.path().join("exports"),
            ..Config::default()
        };

        assert_eq!(run_with_args(&args(&["encode", &json]), Some(&config)), 0);

        let exported = dir.path().join("exports").join("starter.filter");
        assert_eq!(
            fs::read_to_string(exported).unwrap(),
            workspace.to_filter_text()
        );
    }

    #[test]
    fn normalize_rewrites_canonical_text() {
        let dir = TempDir::new().unwrap();
        let input = write(
            &dir,
            "messy.filter",
            "\n\n  Show\n  ItemLevel >= 10\n  ItemLevel <= 100\n\n\n\nHide\r\n",
        );
        let output = path_arg(&dir, "clean.filter");

        assert_eq!(run_with_args(&args(&["normalize", &input, &output]), None), 0);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Show\nRarity = Normal Magic Rare Unique\nItemLevel >= 10\n\
             SetTextColor 255 0 0 255\n\
             SetBackgroundColor 255 255 255 255\nSetBorderColor 255 0 0 255\n\
             SetFontSize 32\n\nHide\nRarity = Normal Magic Rare Unique"
        );
    }

    #[test]
    fn check_passes_clean_filters() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "clean.filter", "# Currency\nShow\nClass == Stackable Currency");

        assert_eq!(run_with_args(&args(&["check", &input]), None), 0);
    }

    #[test]
    fn check_reports_dropped_paragraphs_and_issues() {
        let dir = TempDir::new().unwrap();
        write(&dir, "clean.filter", "Show");
        let nested = dir.path().join("archive");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("old.filter"), "Show\nMinimapIcon 5 Red Star").unwrap();

        assert_eq!(
            run_with_args(&args(&["check", &dir.path().to_string_lossy()]), None),
            1
        );

        let dropped = write(&dir, "dropped.txt", "Class == Gems");
        assert_eq!(run_with_args(&args(&["check", &dropped]), None), 1);
    }
}
