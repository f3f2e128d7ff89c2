use super::*;

const MANIFEST_VERSION: u32 = 1;
const LOGGED_ISSUES_PER_FILE: usize = 2;

pub fn run(args: ParseArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    if !args.input_dir.is_dir() {
        bail!("input directory not found: {}", args.input_dir.display());
    }
    ensure_directory(&args.output_dir)?;

    let sources = discover_sources(&args.input_dir, &args.extension)?;
    if sources.is_empty() {
        bail!(
            "no .{} files found in {}",
            args.extension,
            args.input_dir.display()
        );
    }

    info!(
        input_dir = %args.input_dir.display(),
        run_id = %run_id,
        file_count = sources.len(),
        "starting parse"
    );

    let parser = LegalParser::new()?;
    let outcomes = parse_sources(&parser, &sources, args.jobs)?;
    let batch = merge_outcomes(outcomes);

    let chunks_path = args.output_dir.join(&args.chunks_file);
    let metadata_path = args.output_dir.join(&args.metadata_file);
    let report_path = args.output_dir.join(&args.report_file);
    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| args.output_dir.join("manifests").join("parse_run.json"));

    write_json_pretty(&chunks_path, &batch.chunks)?;
    write_json_pretty(&metadata_path, &batch.metadata)?;
    write_json_pretty(&report_path, &batch.report)?;

    let counts = batch.counts(sources.len());
    let manifest = ParseRunManifest {
        manifest_version: MANIFEST_VERSION,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_parse_command(&args),
        jobs: args.jobs,
        paths: ParseRunPaths {
            input_dir: args.input_dir.display().to_string(),
            output_dir: args.output_dir.display().to_string(),
            chunks_path: chunks_path.display().to_string(),
            metadata_path: metadata_path.display().to_string(),
            report_path: report_path.display().to_string(),
        },
        counts: counts.clone(),
        warnings: batch.warnings,
    };
    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %chunks_path.display(), "wrote chunks");
    info!(path = %metadata_path.display(), "wrote act metadata");
    info!(path = %report_path.display(), "wrote parsing report");
    info!(path = %manifest_path.display(), "wrote parse run manifest");
    info!(
        chunks = counts.chunks_total,
        acts = counts.acts_total,
        succeeded = counts.succeeded,
        failed = counts.failed,
        files_with_issues = counts.files_with_issues,
        "parse completed"
    );

    Ok(())
}

/// Regular files in `input_dir` with the given extension, in sorted order.
pub(super) fn discover_sources(input_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let wanted = extension.trim_start_matches('.');
    let mut sources = Vec::new();

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read {}", input_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", input_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(wanted))
            .unwrap_or(false);

        if matches {
            sources.push(path);
        }
    }

    sources.sort();
    Ok(sources)
}

#[derive(Debug)]
pub(super) struct SourceOutcome {
    pub(super) filename: String,
    pub(super) decoded_name: String,
    pub(super) source_sha256: Option<String>,
    pub(super) result: Result<ParsedAct>,
}

/// Each worker owns its file's parser state; results come back in source order.
pub(super) fn parse_sources(
    parser: &LegalParser,
    sources: &[PathBuf],
    jobs: Option<usize>,
) -> Result<Vec<SourceOutcome>> {
    let work = || {
        sources
            .par_iter()
            .map(|path| parse_source(parser, path))
            .collect::<Vec<SourceOutcome>>()
    };

    match jobs {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("failed to build parse worker pool")?;
            Ok(pool.install(work))
        }
        None => Ok(work()),
    }
}

fn parse_source(parser: &LegalParser, path: &Path) -> SourceOutcome {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let decoded_name = percent_decode(&filename).unwrap_or_else(|| filename.clone());

    let (source_sha256, result) = match sha256_file(path) {
        Ok(hash) => (Some(hash), parser.parse_file(path)),
        Err(err) => (None, Err(err)),
    };

    SourceOutcome {
        filename,
        decoded_name,
        source_sha256,
        result,
    }
}

#[derive(Debug, Default)]
pub(super) struct BatchOutput {
    pub(super) chunks: Vec<LegalChunk>,
    pub(super) metadata: Vec<ActMetadata>,
    pub(super) report: Vec<ParsingReportEntry>,
    pub(super) warnings: Vec<String>,
}

impl BatchOutput {
    pub(super) fn counts(&self, file_count: usize) -> ParseRunCounts {
        ParseRunCounts {
            file_count,
            succeeded: self
                .report
                .iter()
                .filter(|entry| entry.status == ParseStatus::Success)
                .count(),
            failed: self
                .report
                .iter()
                .filter(|entry| entry.status == ParseStatus::Failed)
                .count(),
            files_with_issues: self
                .report
                .iter()
                .filter(|entry| entry.issues.as_ref().is_some_and(|issues| !issues.is_empty()))
                .count(),
            acts_total: self.metadata.len(),
            chunks_total: self.chunks.len(),
        }
    }
}

/// Folds finished files into the three artifacts, one file at a time.
pub(super) fn merge_outcomes(outcomes: Vec<SourceOutcome>) -> BatchOutput {
    let total = outcomes.len();
    let mut batch = BatchOutput::default();

    for (index, outcome) in outcomes.into_iter().enumerate() {
        let position = format!("{}/{}", index + 1, total);
        match outcome.result {
            Ok(parsed) => {
                let statistics = &parsed.metadata.parse_statistics;
                info!(
                    position = %position,
                    file = %outcome.decoded_name,
                    chunks = parsed.chunks.len(),
                    sections = statistics.sections,
                    subsections = statistics.subsections,
                    clauses = statistics.clauses,
                    "parsed act"
                );
                for issue in parsed
                    .metadata
                    .validation_issues
                    .iter()
                    .take(LOGGED_ISSUES_PER_FILE)
                {
                    warn!(file = %outcome.decoded_name, issue = %issue, "parse quality issue");
                }

                batch.report.push(ParsingReportEntry {
                    file: outcome.filename,
                    decoded_name: outcome.decoded_name,
                    status: ParseStatus::Success,
                    source_sha256: outcome.source_sha256,
                    source_encoding: Some(parsed.source_encoding.to_string()),
                    chunks: Some(parsed.chunks.len()),
                    statistics: Some(parsed.metadata.parse_statistics.clone()),
                    issues: Some(parsed.metadata.validation_issues.clone()),
                    error: None,
                });
                batch.chunks.extend(parsed.chunks);
                batch.metadata.push(parsed.metadata);
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!(
                    position = %position,
                    file = %outcome.decoded_name,
                    error = %message,
                    "failed to parse act"
                );

                batch
                    .warnings
                    .push(format!("{}: {}", outcome.filename, message));
                batch.report.push(ParsingReportEntry {
                    file: outcome.filename,
                    decoded_name: outcome.decoded_name,
                    status: ParseStatus::Failed,
                    source_sha256: outcome.source_sha256,
                    source_encoding: None,
                    chunks: None,
                    statistics: None,
                    issues: None,
                    error: Some(message),
                });
            }
        }
    }

    batch
}

fn render_parse_command(args: &ParseArgs) -> String {
    let mut command = vec![
        "vidhi".to_string(),
        "parse".to_string(),
        "--input-dir".to_string(),
        args.input_dir.display().to_string(),
        "--output-dir".to_string(),
        args.output_dir.display().to_string(),
        "--extension".to_string(),
        args.extension.clone(),
        "--chunks-file".to_string(),
        args.chunks_file.clone(),
        "--metadata-file".to_string(),
        args.metadata_file.clone(),
        "--report-file".to_string(),
        args.report_file.clone(),
    ];

    if let Some(jobs) = args.jobs {
        command.push("--jobs".to_string());
        command.push(jobs.to_string());
    }
    if let Some(path) = &args.manifest_path {
        command.push("--manifest-path".to_string());
        command.push(path.display().to_string());
    }

    command.join(" ")
}
