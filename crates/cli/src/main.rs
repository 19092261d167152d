//! Headless shell for the resume studio
//!
//! Loads the snapshot workspace, shows pagination, and runs the export
//! pipeline end to end without a GUI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doc_model::{
    CustomField, CustomizationProfile, PersonalInfo, ResumeDocument, Section, TemplateCatalog,
};
use layout_engine::Paginator;
use render_model::{PreviewDocument, PreviewRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use raster_engine::RasterOptions;
use store::{ExportMode, ExportOptions, Exporter, NoticeCenter, SnapshotStore};

#[derive(Parser)]
#[command(name = "resume-studio", about = "Resume studio headless shell", version)]
struct Cli {
    /// Directory holding the snapshot blobs
    #[arg(long, default_value = ".resume-studio")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a sample workspace snapshot to the data directory
    Init,
    /// Show the document and its pagination
    Show,
    /// List the built-in templates
    Templates,
    /// Export the workspace to a PDF
    Export {
        /// Output directory for the artifact
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Override the generated filename
        #[arg(long)]
        filename: Option<String>,

        /// Render one continuous sheet and let the assembler slice it
        #[arg(long)]
        continuous: bool,

        /// Resolution multiplier for rasterization
        #[arg(long, default_value_t = 2.0)]
        supersampling: f32,

        /// Apply a built-in template before exporting
        #[arg(long)]
        template: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let store = SnapshotStore::new(&cli.data_dir);

    match cli.command {
        Command::Init => init(&store).await,
        Command::Show => show(&store).await,
        Command::Templates => {
            templates();
            Ok(())
        }
        Command::Export {
            output_dir,
            filename,
            continuous,
            supersampling,
            template,
        } => {
            export(
                &store,
                output_dir,
                filename,
                continuous,
                supersampling,
                template,
            )
            .await
        }
    }
}

async fn init(store: &SnapshotStore) -> Result<()> {
    let document = sample_document()?;
    store
        .save_workspace(&document, &CustomizationProfile::default())
        .await
        .context("writing sample workspace")?;
    println!("Sample workspace written to {}", store.dir().display());
    Ok(())
}

async fn show(store: &SnapshotStore) -> Result<()> {
    let (document, profile) = store
        .load_workspace()
        .await
        .context("loading workspace (run `init` first?)")?;

    println!("{}", document.personal.full_name());
    for section in document.sections() {
        let marker = if section.visible { " " } else { "x" };
        println!(
            "  [{}] {} ({} items)",
            marker,
            section.title,
            section.content.item_count()
        );
    }

    let sections = document.visible_sections();
    let pagination = Paginator::new().paginate(&sections, &profile)?;
    println!(
        "{} page(s), max {}",
        pagination.page_count(),
        profile.page.max_pages
    );
    if pagination.is_truncated() {
        println!(
            "warning: {} section(s) dropped at the page limit",
            pagination.overflow.len()
        );
    }
    Ok(())
}

fn templates() {
    for template in TemplateCatalog::builtin().templates() {
        println!("{:<12} {}", template.id, template.name);
    }
}

async fn export(
    store: &SnapshotStore,
    output_dir: PathBuf,
    filename: Option<String>,
    continuous: bool,
    supersampling: f32,
    template: Option<String>,
) -> Result<()> {
    let (document, mut profile) = store
        .load_workspace()
        .await
        .context("loading workspace (run `init` first?)")?;

    if let Some(id) = template {
        let catalog = TemplateCatalog::builtin();
        let template = catalog
            .get(&id)
            .with_context(|| format!("unknown template '{}'", id))?;
        profile = template.apply(&profile);
    }

    let registry = Arc::new(PreviewRegistry::new());
    registry.mount("workspace", PreviewDocument::new(document, profile));

    let notices = Arc::new(NoticeCenter::new());
    let options = ExportOptions {
        mode: if continuous {
            ExportMode::Continuous
        } else {
            ExportMode::Paged
        },
        raster: RasterOptions { supersampling },
        ..Default::default()
    };

    let exporter = Exporter::new(registry, notices, output_dir).with_options(options);
    let artifact = exporter.export_document("workspace", filename.as_deref()).await?;

    println!(
        "Wrote {} ({} page(s), {} bytes)",
        artifact.path.display(),
        artifact.page_count,
        artifact.bytes
    );
    Ok(())
}

fn sample_document() -> Result<ResumeDocument> {
    let mut document = ResumeDocument::new();
    document.personal = PersonalInfo {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        headline: "Analytical Engine Programmer".into(),
        email: "ada@example.com".into(),
        phone: "+44 20 0000 0000".into(),
        location: "London".into(),
        ..Default::default()
    };

    document.add_section(Section::text(
        "Summary",
        "Mathematician and writer, known for work on the Analytical Engine; \
         published the first algorithm intended for execution by a machine.",
    ))?;
    document.add_section(Section::custom(
        "Experience",
        vec![
            CustomField::new("Role", "Collaborator, Analytical Engine"),
            CustomField::new("Years", "1833-1852"),
        ],
    ))?;
    document.add_section(Section::list(
        "Skills",
        vec![
            "Mathematical analysis".into(),
            "Algorithm design".into(),
            "Technical writing".into(),
        ],
    ))?;

    Ok(document)
}
