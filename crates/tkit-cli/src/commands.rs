use std::io::Read;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tkit_diff::{
    compare, render_report, Algorithm, Brackets, DiffError, Document, HtmlSpans, InputLimits,
    Report,
};
use tkit_server::{ServerConfig, TkitServer};

use crate::cli::*;
use crate::style::Terminal;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, cli.format),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let limits = diff_limits(&args);
    let source = read_document(&args.old, "source", &limits).map_err(large_input_hint)?;
    let target = read_document(&args.new, "target", &limits).map_err(large_input_hint)?;

    let report = compare(&source, &target, args.algorithm);
    print!("{}", render_output(&report, format, args.style)?);
    Ok(())
}

/// `lcs` keeps the library's default line ceiling; `myers` runs in linear
/// space and is unlimited. Explicit flags win either way.
fn diff_limits(args: &DiffArgs) -> InputLimits {
    let defaults = match args.algorithm {
        Algorithm::Lcs => InputLimits::default(),
        Algorithm::Myers => InputLimits::UNLIMITED,
    };
    InputLimits {
        max_lines: args.max_lines.unwrap_or(defaults.max_lines),
        max_bytes: args.max_bytes.unwrap_or(defaults.max_bytes),
    }
}

fn large_input_hint(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<DiffError>() {
        Some(DiffError::SizeExceeded { .. }) => {
            err.context("input too large; use --algorithm myers or raise --max-lines/--max-bytes")
        }
        _ => err,
    }
}

fn read_document(path: &Path, what: &str, limits: &InputLimits) -> anyhow::Result<Document> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).context("reading standard input")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
    };
    let doc = limits
        .bytes(what, &bytes)
        .with_context(|| format!("loading {}", path.display()))?;
    tracing::debug!(path = %path.display(), lines = doc.len(), "loaded {what}");
    Ok(doc)
}

fn render_output(report: &Report, format: OutputFormat, style: Style) -> anyhow::Result<String> {
    let out = match format {
        OutputFormat::Json => format!("{}\n", report.to_json_pretty()?),
        OutputFormat::Text => match style {
            Style::Brackets => render_report(&Brackets, report),
            Style::Html => render_report(&HtmlSpans, report),
            Style::Color => render_report(&Terminal, report),
        },
    };
    Ok(out)
}

fn server_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = server_config(&args)?;
    println!(
        "tkit server on {} (algorithm: {}, max lines: {})",
        config.bind_addr.to_string().bold(),
        config.algorithm.to_string().cyan(),
        config.limits.max_lines
    );
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(TkitServer::new(config).serve())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn reads_document_from_file() {
        let file = write_temp(b"one\ntwo\n");
        let doc = read_document(file.path(), "source", &InputLimits::UNLIMITED).unwrap();
        assert_eq!(doc.lines(), &["one", "two"]);
    }

    #[test]
    fn binary_file_is_invalid_input() {
        let file = write_temp(&[0x00, 0xFF, 0xFE]);
        let err = read_document(file.path(), "source", &InputLimits::UNLIMITED).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiffError>(),
            Some(DiffError::InvalidInput(_))
        ));
    }

    #[test]
    fn line_limit_applies() {
        let file = write_temp(b"1\n2\n3\n");
        let limits = InputLimits { max_lines: 2, max_bytes: usize::MAX };
        let err = read_document(file.path(), "target", &limits).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiffError>(),
            Some(DiffError::SizeExceeded { .. })
        ));
    }

    fn diff_args(extra: &[&str]) -> DiffArgs {
        let mut argv = vec!["tkit", "diff"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["a", "b"]);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Diff(args) => args,
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn lcs_diff_has_default_ceiling() {
        assert_eq!(diff_limits(&diff_args(&[])), InputLimits::default());
        assert_eq!(diff_limits(&diff_args(&["-a", "myers"])), InputLimits::UNLIMITED);

        let limits = diff_limits(&diff_args(&["--max-lines", "7"]));
        assert_eq!(limits.max_lines, 7);
        assert_eq!(limits.max_bytes, InputLimits::default().max_bytes);
    }

    #[test]
    fn oversized_lcs_input_suggests_myers() {
        let lines = InputLimits::default().max_lines + 1;
        let file = write_temp("x\n".repeat(lines).as_bytes());
        let args = diff_args(&[]);
        let err = read_document(file.path(), "source", &diff_limits(&args))
            .map_err(large_input_hint)
            .unwrap_err();
        assert!(err.to_string().contains("--algorithm myers"));
        assert!(matches!(
            err.downcast_ref::<DiffError>(),
            Some(DiffError::SizeExceeded { .. })
        ));

        let myers = diff_args(&["-a", "myers"]);
        let doc = read_document(file.path(), "source", &diff_limits(&myers)).unwrap();
        assert_eq!(doc.len(), lines);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let err = read_document(&path, "source", &InputLimits::UNLIMITED).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn bracket_output() {
        let report = compare(
            &Document::from_text("hello world\n"),
            &Document::from_text("hello there\n"),
            Algorithm::Lcs,
        );
        let out = render_output(&report, OutputFormat::Text, Style::Brackets).unwrap();
        assert_eq!(out, "@@ -1,1 +1,1 @@ replace\n- hello [world]\n+ hello [there]\n");
    }

    #[test]
    fn json_output_parses_back() {
        let report = compare(
            &Document::from_text("a\nb"),
            &Document::from_text("a\nc"),
            Algorithm::Myers,
        );
        let out = render_output(&report, OutputFormat::Json, Style::Color).unwrap();
        let back: Report = serde_json::from_str(&out).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn serve_flags_override_config_file() {
        let file = write_temp(b"algorithm = \"myers\"\n[limits]\nmax_lines = 42\n");
        let args = ServeArgs {
            bind: Some("0.0.0.0:9999".parse().unwrap()),
            config: Some(file.path().to_path_buf()),
            algorithm: None,
        };
        let config = server_config(&args).unwrap();
        assert_eq!(config.bind_addr.port(), 9999);
        assert_eq!(config.algorithm, Algorithm::Myers);
        assert_eq!(config.limits.max_lines, 42);

        let args = ServeArgs { bind: None, config: None, algorithm: Some(Algorithm::Myers) };
        let config = server_config(&args).unwrap();
        assert_eq!(config.bind_addr, ServerConfig::default().bind_addr);
        assert_eq!(config.algorithm, Algorithm::Myers);
    }
}
