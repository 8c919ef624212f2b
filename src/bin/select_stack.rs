use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use stackselect::discovery::{read_profile_dir, read_tenant_config};
use stackselect::orchestration::{
    describe_stack, log_event, select_stack, SelectionEvent, SelectionEventType,
};
use stackselect::render;
use stackselect::settings;
use stackselect::view::{self, StackFileStatus};
use stackselect::{LoadReport, ProfileStore};

fn main() -> Result<()> {
    let mut args = CliArgs::parse()?;

    if let Some(dir) = args.set_config_dir.take() {
        let mut app_settings = settings::load_or_default()?;
        app_settings.profile_dir = Some(dir);
        settings::save(&app_settings)?;
        println!(
            "Profile directory recorded at {}",
            settings::settings_file_path()?.display()
        );
        return Ok(());
    }

    let app_settings = settings::load_or_default()?;
    let profile_dir = settings::resolve_profile_dir(args.config_dir.as_deref(), &app_settings);
    let (sources, discovery_warnings) = read_profile_dir(&profile_dir)?;
    let (store, mut report) = ProfileStore::load(&sources)?;
    report.warnings.extend(discovery_warnings);
    print_load_report(&report, args.json);
    record_event(
        SelectionEventType::StoreLoaded,
        serde_json::json!({
            "dir": profile_dir.display().to_string(),
            "loaded": report.loaded,
        }),
    );

    if args.list || args.config_file.is_none() {
        if args.config_file.is_none() && !args.list {
            print_usage();
        }
        println!("\n{}", render::profile_list(&store));
        println!("Configuration files loaded from: {}", profile_dir.display());
        return Ok(());
    }

    // take() leaves `args` whole for the run_* calls below.
    let config_file = match args.config_file.take() {
        Some(path) => path,
        None => return Ok(()),
    };
    let raw = read_tenant_config(&config_file)?;
    let config_path = absolute(&config_file);

    if args.describe {
        return run_describe(&store, &raw, &config_path, &args);
    }
    run_select(&store, &raw, &config_path, &args)
}

fn run_select(store: &ProfileStore, raw: &str, config_path: &Path, args: &CliArgs) -> Result<()> {
    let outcome = select_stack(
        store,
        raw,
        config_path,
        args.override_type.as_deref(),
        &args.stack_root,
    )?;

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
        return Ok(());
    }

    println!("{}", render::tenant_summary(&outcome.tenant, &outcome.selected_name));
    println!("{}", render::profile_details(&outcome.profile));
    if let Some(line) = render::stack_status_warning(&outcome.stack_status) {
        eprintln!("{line}");
    }
    println!("Selected stack: {}", outcome.stack_file);
    println!("\n{}", render::export_commands(&outcome));
    record_event(
        SelectionEventType::StackSelected,
        serde_json::json!({
            "deployment_type": outcome.selected_name,
            "stack_file": outcome.stack_file,
        }),
    );
    Ok(())
}

fn run_describe(store: &ProfileStore, raw: &str, config_path: &Path, args: &CliArgs) -> Result<()> {
    let outcome = describe_stack(
        store,
        raw,
        config_path,
        args.override_type.as_deref(),
        &args.stack_root,
    )?;

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    if args.json {
        let document = serde_json::json!({
            "selection": outcome.summary,
            "profile": view::summary(&outcome.profile),
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!("{}", render::tenant_summary(&outcome.tenant, &outcome.selected_name));
    println!("{}", render::profile_details(&outcome.profile));
    match &outcome.stack_status {
        StackFileStatus::Unconfigured => {
            println!("Stack file: not configured (profile not yet deployable)");
        }
        StackFileStatus::Present(path) | StackFileStatus::MissingOnDisk(path) => {
            println!("Stack file: {}", path.display());
        }
    }
    record_event(
        SelectionEventType::StackDescribed,
        serde_json::json!({ "deployment_type": outcome.selected_name }),
    );
    Ok(())
}

fn print_load_report(report: &LoadReport, json_output: bool) {
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    // Keep stdout clean for --json consumers.
    if !json_output {
        println!("Loaded {} deployment configurations", report.loaded);
    }
}

/// Best-effort audit logging; never fails the invocation.
fn record_event(event_type: SelectionEventType, details: serde_json::Value) {
    if let Ok(root) = settings::workspace_root() {
        let _ = log_event(&root, &SelectionEvent::new(event_type, details));
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

struct CliArgs {
    config_file: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    set_config_dir: Option<PathBuf>,
    stack_root: PathBuf,
    override_type: Option<String>,
    list: bool,
    describe: bool,
    json: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut config_file = None;
        let mut config_dir = None;
        let mut set_config_dir = None;
        let mut stack_root = PathBuf::from(".");
        let mut override_type = None;
        let mut list = false;
        let mut describe = false;
        let mut json = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--list" => list = true,
                "--describe" => describe = true,
                "--json" => json = true,
                "--type" => {
                    let value = args
                        .next()
                        .context("Expected a deployment type after --type")?;
                    override_type = Some(value);
                }
                "--config-dir" => {
                    let value = args.next().context("Expected a directory after --config-dir")?;
                    config_dir = Some(PathBuf::from(value));
                }
                "--set-config-dir" => {
                    let value = args
                        .next()
                        .context("Expected a directory after --set-config-dir")?;
                    set_config_dir = Some(PathBuf::from(value));
                }
                "--stack-root" => {
                    let value = args.next().context("Expected a directory after --stack-root")?;
                    stack_root = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with('-') => {
                    return Err(anyhow!(
                        "Unknown argument '{other}'. Run with --help for usage instructions."
                    ));
                }
                other => {
                    if config_file.is_some() {
                        return Err(anyhow!("Only one configuration file may be given."));
                    }
                    config_file = Some(PathBuf::from(other));
                }
            }
        }
        Ok(Self {
            config_file,
            config_dir,
            set_config_dir,
            stack_root,
            override_type,
            list,
            describe,
            json,
        })
    }
}


fn print_usage() {
    println!("Stack Selector - choose the right Terragrunt stack for a tenant configuration");
    println!("Usage: select_stack <tenant.yaml> [options]");
    println!("       select_stack --list");
    println!("Options:");
    println!("  --type <name>        Override the deployment type from the tenant config");
    println!("  --describe           Inspect the resolved profile without requiring a stack file");
    println!("  --json               Emit the machine-readable selection summary");
    println!("  --config-dir <dir>   Directory holding deployment-type YAML definitions");
    println!("  --set-config-dir <dir>  Persist the profile directory in the settings file and exit");
    println!("  --stack-root <dir>   Directory stack file paths are resolved against (default: .)");
    println!("  --list               List all available deployment types");
    println!("  -h, --help           Show this help message");
}
