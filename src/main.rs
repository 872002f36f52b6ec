use clap::Parser;
use dialoguer::Confirm;
use shiptrack::cli::{Cli, Commands};
use shiptrack::config::Config;
use shiptrack::error::{Result, ShiptrackError};
use shiptrack::record::Project;
use shiptrack::registry::category::build_tree;
use shiptrack::registry::Registry;
use shiptrack::session::{self, Draft, Session};
use shiptrack::sites::SiteDirectory;
use shiptrack::{email, workbook};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Add { spreadsheet, purchase_order, project, yes } => {
            println!("📦 shiptrack - add shipment\n");

            let mut session = Session::with_draft(Draft {
                project,
                spreadsheet_path: Some(spreadsheet.clone()),
                purchase_order_path: Some(purchase_order.clone()),
            });

            // 1. Gate: both source documents must exist
            println!("[1/3] Checking source documents...");
            let valid = session.draft().map(Draft::is_valid).unwrap_or(false);
            if !valid {
                return Err(ShiptrackError::InvalidDraft(
                    "both source documents must exist".into(),
                ));
            }
            println!("✔ documents found\n");

            // 2. Parse the notification
            println!("[2/3] Parsing shipment notification...");
            let shipment = workbook::parse_shipment_notification(&spreadsheet)?;
            println!(
                "✔ order {} ({} lines)\n",
                shipment.order_number,
                shipment.lines.len()
            );

            if project == Project::Pvaas && !shipment.order_number.contains("SCTASK") && !yes {
                let proceed = Confirm::new()
                    .with_prompt(format!(
                        "Project is set to {} but no SCTASK was found in the notification. Add it anyway?",
                        Project::Pvaas
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| ShiptrackError::Prompt(e.to_string()))?;
                if !proceed {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            // 3. Intake + registry append
            println!("[3/3] Filing the item...");
            let registry = Registry::new(&config.registry_path);
            let record = session.submit(shipment, &registry, &config)?;
            println!("✔ filed under {}\n", record.project);

            println!("✅ New item \"{}\" created in {}", record.title, record.project);
        }

        Commands::List => {
            let registry = Registry::new(&config.registry_path);
            let records = registry.load()?;
            let tree = build_tree(&records);
            print!("{}", tree.render());
            if cli.verbose {
                println!("\n{} tracked item(s)", tree.leaf_count());
            }
        }

        Commands::Show { id } => {
            let registry = Registry::new(&config.registry_path);
            let records = registry.load()?;
            let tree = build_tree(&records);

            let mut session = Session::new();
            let record = session.select(&tree, &records, id)?;
            session::print_record(record);
        }

        Commands::Archive { id } => {
            let registry = Registry::new(&config.registry_path);
            let records = registry.load()?;
            let tree = build_tree(&records);
            let index = tree
                .record_index(id)
                .ok_or(ShiptrackError::RecordNotFound(id as usize))?;

            let record = registry.mark_archived(index)?;
            println!("✔ archived \"{}\" ({})", record.title, record.project);
        }

        Commands::Email { id, output } => {
            println!("✉️  shiptrack - notification email\n");

            let registry = Registry::new(&config.registry_path);
            let records = registry.load()?;
            let tree = build_tree(&records);
            let index = tree
                .record_index(id)
                .ok_or(ShiptrackError::RecordNotFound(id as usize))?;

            let path = email::generate_for_record(
                &config,
                &registry,
                &records,
                index,
                output.as_deref(),
            )?;
            println!("✔ draft written: {}", path.display());
            println!("Open it in your mail client, attach the item documents, review and send.");
        }

        Commands::Review => {
            println!("📦 shiptrack - review\n");
            session::run_interactive_review(&config)?;
        }

        Commands::Site { station, area } => {
            let directory = SiteDirectory::from_xlsx(&config.site_list_path)?;
            let site = directory.lookup(&station, &area)?;

            println!("Station {} ({})", site.station, site.area);
            println!("  district:  {}", site.district);
            println!("  region:    {}", site.region);
            println!("  address:   {}", site.shipping_address);
            println!(
                "  city:      {}, {} {}",
                site.shipping_city, site.shipping_state, site.shipping_zip
            );
            println!("  logistics: {}", site.logistics_emails);
            println!("  IT:        {}", site.it_emails);
            println!(
                "  POC:       {} {} {}",
                site.delivery_poc.name, site.delivery_poc.phone, site.delivery_poc.email
            );
        }

        Commands::Track { number } => {
            let mut index = email::TrackingIndex::load(&config.emails_dir);
            let added = index.scan_folder(&config.emails_dir)?;
            index.save(&config.emails_dir)?;
            println!("✔ indexed {} new email(s), {} total", added, index.len());

            if let Some(number) = number {
                match index.find_email(&number) {
                    Some(file) => println!("{} first appeared in {}", number, file),
                    None => println!("{} not found in any stored email", number),
                }
            }
        }

        Commands::Config { show, set_files_root, set_site_list, set_emails_dir, set_template } => {
            let mut config = config;
            let mut changed = false;

            if let Some(path) = set_files_root {
                config.files_root = path;
                changed = true;
            }
            if let Some(path) = set_site_list {
                config.site_list_path = path;
                changed = true;
            }
            if let Some(path) = set_emails_dir {
                config.emails_dir = path;
                changed = true;
            }
            if let Some(path) = set_template {
                config.template_path = Some(path);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ configuration saved");
            }

            if show || !changed {
                println!("Configuration:");
                println!("  files root: {}", config.files_root.display());
                println!("  registry:   {}", config.registry_path.display());
                println!("  site list:  {}", config.site_list_path.display());
                println!("  emails:     {}", config.emails_dir.display());
                println!(
                    "  template:   {}",
                    match &config.template_path {
                        Some(path) => path.display().to_string(),
                        None => "(built-in)".to_string(),
                    }
                );
            }
        }
    }

    Ok(())
}
