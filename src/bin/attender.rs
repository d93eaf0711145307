//! Attender CLI - Command-line interface for Attender Core
//!
//! Commands:
//! - report: Build a per-student attendance report from record documents
//! - calendar: Project records onto a date-ordered status timeline
//! - roster: Build the all-students defaulter table
//! - validate: Validate record documents against the schema
//! - doctor: Diagnose engine configuration
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use attender_core::calendar::{CalendarProjector, SubjectFilter};
use attender_core::pipeline::AttendanceEngine;
use attender_core::resolver::SubjectResolver;
use attender_core::schema::{RawRecordAdapter, SCHEMA_VERSION};
use attender_core::store::{MemoryStore, RecordStore};
use attender_core::types::AttendanceRecord;
use attender_core::{ENGINE_VERSION, PRODUCER_NAME};

/// Attender - attendance aggregation and reporting engine
#[derive(Parser)]
#[command(name = "attender")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Turn attendance records into reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a per-student attendance report
    Report {
        /// Input file of record documents (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Student roll number to report on
        #[arg(short, long)]
        student: String,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,
    },

    /// Project records onto a date-ordered status timeline
    Calendar {
        /// Input file of record documents (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Student roll number
        #[arg(short, long)]
        student: String,

        /// Restrict to one subject ("all" keeps every subject)
        #[arg(long, default_value = "all")]
        subject: String,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,
    },

    /// Build the all-students defaulter table
    Roster {
        /// Input file of record documents (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Roster file: JSON array of {"roll_no", "name"} entries
        #[arg(short, long)]
        roster: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output as JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// Validate record documents against the schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose engine configuration
    Doctor {
        /// Check a recorder-to-subject table file
        #[arg(long)]
        subjects: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one document per line)
    Ndjson,
    /// JSON array of documents
    Json,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (attendance.record.v1)
    Input,
    /// Output schema (attendance.report.v1)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AttenderCliError> {
    match cli.command {
        Commands::Report {
            input,
            output,
            student,
            input_format,
        } => cmd_report(&input, &output, &student, input_format),

        Commands::Calendar {
            input,
            student,
            subject,
            input_format,
        } => cmd_calendar(&input, &student, &subject, input_format),

        Commands::Roster {
            input,
            roster,
            input_format,
            json,
        } => cmd_roster(&input, &roster, input_format, json),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Doctor { subjects, json } => cmd_doctor(subjects.as_deref(), json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_report(
    input: &PathBuf,
    output: &PathBuf,
    student: &str,
    input_format: InputFormat,
) -> Result<(), AttenderCliError> {
    let records = load_records(input, input_format)?;
    let records = records_for_student(records, student);

    let engine = AttendanceEngine::default();
    let report = engine.student_report(student, &records);
    let report_json = engine.report_to_json(&report)?;

    if output.to_string_lossy() == "-" {
        println!("{}", report_json);
    } else {
        fs::write(output, report_json)?;
    }

    Ok(())
}

fn cmd_calendar(
    input: &PathBuf,
    student: &str,
    subject: &str,
    input_format: InputFormat,
) -> Result<(), AttenderCliError> {
    let records = load_records(input, input_format)?;
    let records = records_for_student(records, student);

    let filter = if subject == "all" {
        SubjectFilter::All
    } else {
        SubjectFilter::one(subject)
    };

    let timeline = CalendarProjector::project(&records, &filter);
    println!("{}", serde_json::to_string_pretty(&timeline)?);

    Ok(())
}

fn cmd_roster(
    input: &PathBuf,
    roster_path: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), AttenderCliError> {
    let records = load_records(input, input_format)?;

    let roster_json = fs::read_to_string(roster_path)?;
    let entries: Vec<RosterEntry> = serde_json::from_str(&roster_json)?;
    let roster: Vec<(String, String)> = entries
        .into_iter()
        .map(|e| (e.roll_no, e.name))
        .collect();

    let mut store = MemoryStore::new();
    for record in records {
        store.insert(record);
    }

    let engine = AttendanceEngine::default();
    let rows = engine.roster_report(&roster, &store);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!(
            "{:<12} {:<24} {:>7} {:>8} {:>8}  Status",
            "Roll No", "Name", "Total", "Present", "Pct"
        );
        for row in &rows {
            println!(
                "{:<12} {:<24} {:>7} {:>8} {:>7.2}%  {}",
                row.roll_no,
                row.name,
                row.total_classes,
                row.present_days,
                row.percentage,
                row.status.as_str()
            );
        }
    }

    Ok(())
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), AttenderCliError> {
    let input_data = read_input(input)?;

    let raw = match input_format {
        InputFormat::Ndjson => RawRecordAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => RawRecordAdapter::parse_array(&input_data)?,
    };

    let outcomes = RawRecordAdapter::validate_records(&raw);

    let report = ValidationReport {
        total_records: raw.len(),
        valid_records: raw.len() - outcomes.len(),
        invalid_records: outcomes.len(),
        errors: outcomes
            .iter()
            .map(|o| ValidationErrorDetail {
                index: o.index,
                record_id: o.record_id.clone(),
                error: o.error.as_ref().map(|e| e.to_string()).unwrap_or_default(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Record {} (index {}): {}",
                    err.record_id.as_deref().unwrap_or("unknown"),
                    err.index,
                    err.error
                );
            }
        }
    }

    if report.invalid_records > 0 {
        Err(AttenderCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_doctor(subjects: Option<&std::path::Path>, json: bool) -> Result<(), AttenderCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Attender Core version {}", ENGINE_VERSION),
    });

    checks.push(DoctorCheck {
        name: "schema_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Input schema: {}", SCHEMA_VERSION),
    });

    if let Some(subjects_path) = subjects {
        if subjects_path.exists() {
            match fs::read_to_string(subjects_path) {
                Ok(content) => match SubjectResolver::from_json(&content) {
                    Ok(resolver) => {
                        let status = if resolver.is_empty() {
                            CheckStatus::Warning
                        } else {
                            CheckStatus::Ok
                        };
                        checks.push(DoctorCheck {
                            name: "subject_table".to_string(),
                            status,
                            message: format!(
                                "Subject table valid ({} recorders mapped)",
                                resolver.len()
                            ),
                        });
                    }
                    Err(e) => {
                        checks.push(DoctorCheck {
                            name: "subject_table".to_string(),
                            status: CheckStatus::Error,
                            message: format!("Invalid subject table: {}", e),
                        });
                    }
                },
                Err(e) => {
                    checks.push(DoctorCheck {
                        name: "subject_table".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Cannot read subject table file: {}", e),
                    });
                }
            }
        } else {
            checks.push(DoctorCheck {
                name: "subject_table".to_string(),
                status: CheckStatus::Warning,
                message: "Subject table file does not exist".to_string(),
            });
        }
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (ready for piped records)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Attender Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(AttenderCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), AttenderCliError> {
    match schema_type {
        SchemaType::Input => {
            println!("Input Schema: {}", SCHEMA_VERSION);
            println!();
            println!("One attendance document per record:");
            println!();
            println!("- student: student roll number (required)");
            println!("- date: ISO calendar date, YYYY-MM-DD (required)");
            println!("- status: Present | Absent | NoCollege");
            println!("  (missing or unrecognized values default to Absent)");
            println!("- subject: subject tag resolved at mark-time");
            println!("  (missing values default to the Unknown sentinel;");
            println!("   Unknown-subject records are excluded from aggregation)");
            println!("- marked_by: recorder identity (audit only)");
            println!("- record_id: unique identifier (audit only)");
        }
        SchemaType::Output => {
            println!("Output Schema: attendance.report.v1");
            println!();
            println!("Per-student report payload:");
            println!();
            println!("- report_version: schema version");
            println!("- producer: {{ name, version, instance_id }}");
            println!("- student, generated_at_utc");
            println!("- subjects: map of subject -> {{ present_count, total_count, percentage }}");
            println!("- overall: {{ present_count, total_count, percentage }}");
            println!("- defaulter_status: Defaulter | NotDefaulter (75% threshold)");
            println!("- calendar: date-ordered [{{ date, status }}] timeline");
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, AttenderCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn load_records(
    input: &PathBuf,
    input_format: InputFormat,
) -> Result<Vec<AttendanceRecord>, AttenderCliError> {
    let input_data = read_input(input)?;

    let raw = match input_format {
        InputFormat::Ndjson => RawRecordAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => RawRecordAdapter::parse_array(&input_data)?,
    };

    Ok(RawRecordAdapter::to_records(raw)?)
}

fn records_for_student(records: Vec<AttendanceRecord>, student: &str) -> Vec<AttendanceRecord> {
    records
        .into_iter()
        .filter(|r| r.student_id == student)
        .collect()
}

// Error types

#[derive(Debug)]
enum AttenderCliError {
    Io(io::Error),
    Engine(attender_core::EngineError),
    Json(serde_json::Error),
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for AttenderCliError {
    fn from(e: io::Error) -> Self {
        AttenderCliError::Io(e)
    }
}

impl From<attender_core::EngineError> for AttenderCliError {
    fn from(e: attender_core::EngineError) -> Self {
        AttenderCliError::Engine(e)
    }
}

impl From<serde_json::Error> for AttenderCliError {
    fn from(e: serde_json::Error) -> Self {
        AttenderCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<AttenderCliError> for CliError {
    fn from(e: AttenderCliError) -> Self {
        match e {
            AttenderCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            AttenderCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input matches the attendance.record.v1 schema".to_string()),
            },
            AttenderCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            AttenderCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            AttenderCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Deserialize)]
struct RosterEntry {
    roll_no: String,
    name: String,
}

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    record_id: Option<String>,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
