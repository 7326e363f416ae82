//! Crop commands.

use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};

use harvest_trail_core::{CropId, SupplierCode};

use harvest_trail_client::models::{Crop, CropDraft};
use harvest_trail_client::services::CropService;

use super::{CommandError, Context};

#[derive(Args)]
pub struct DraftArgs {
    /// Crop name
    #[arg(long)]
    pub name: String,

    /// Crop type (e.g. Vegetable, Grain)
    #[arg(long = "type")]
    pub crop_type: String,

    /// Harvest date (YYYY-MM-DD)
    #[arg(long)]
    pub harvest: NaiveDate,

    /// Expiry date (YYYY-MM-DD)
    #[arg(long)]
    pub expiry: NaiveDate,

    /// Soil type
    #[arg(long)]
    pub soil: String,

    /// Pesticide note
    #[arg(long)]
    pub pesticides: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// Location override for the provenance stamp
    #[arg(long)]
    pub location: Option<String>,
}

impl From<DraftArgs> for CropDraft {
    fn from(args: DraftArgs) -> Self {
        Self {
            name: args.name,
            crop_type: args.crop_type,
            harvest_date: args.harvest,
            expiry_date: args.expiry,
            soil_type: args.soil,
            pesticides_used: args.pesticides,
            image_url: args.image_url,
            location: args.location,
        }
    }
}

#[derive(Subcommand)]
pub enum CropAction {
    /// List your crops
    List,
    /// Record a new crop
    Add {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Update a crop
    Update {
        /// Crop ID
        id: i64,

        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a crop
    Delete {
        /// Crop ID
        id: i64,
    },
    /// Receive crops from a supplier into your inventory
    Receive {
        /// The supplier's 3-digit custody code
        #[arg(long)]
        supplier: SupplierCode,

        /// Crop ID to receive (repeatable)
        #[arg(long = "crop", required = true)]
        crops: Vec<i64>,
    },
    /// Trace a crop's provenance (public scan)
    Scan {
        /// Crop ID
        id: i64,
    },
}

pub async fn run(action: CropAction) -> Result<(), CommandError> {
    let ctx = Context::from_env()?;
    let service = CropService::new(ctx.api.clone(), ctx.store.clone());

    match action {
        CropAction::List => {
            let user = ctx.require_user()?;
            let crops = service.list(&user).await?;

            if crops.is_empty() {
                println!("no crops recorded");
                return Ok(());
            }

            let today = Utc::now().date_naive();
            for crop in &crops {
                print_crop_row(crop, today);
            }
            println!("{} crop(s)", crops.len());
        }
        CropAction::Add { draft } => {
            let user = ctx.require_user()?;
            let crop = service.create(&user, &draft.into()).await?;
            println!("recorded crop {} ({})", crop.id, crop.name);
        }
        CropAction::Update { id, draft } => {
            let user = ctx.require_user()?;
            let crop = service.update(&user, CropId::new(id), &draft.into()).await?;
            println!("updated crop {} ({})", crop.id, crop.name);
        }
        CropAction::Delete { id } => {
            let user = ctx.require_user()?;
            service.delete(&user, CropId::new(id)).await?;
            println!("deleted crop {id}");
        }
        CropAction::Receive { supplier, crops } => {
            let user = ctx.require_user()?;
            let available = service.supplier_crops(&user, &supplier).await?;

            let mut selected = Vec::new();
            for id in crops {
                let id = CropId::new(id);
                let Some(crop) = available.iter().find(|c| c.id == id) else {
                    return Err(format!("supplier {supplier} has no crop {id}").into());
                };
                selected.push(crop.clone());
            }

            let received = service.receive(&user, Some(&supplier), &selected).await?;
            println!("received {} crop(s) from supplier {supplier}", received.len());
        }
        CropAction::Scan { id } => {
            let crop = service.scan(CropId::new(id)).await?;
            print_provenance(&crop);
        }
    }

    Ok(())
}

fn print_crop_row(crop: &Crop, today: NaiveDate) {
    println!(
        "  {:>8}  {:<20} {:<12} {:<12} harvested {}  expires {}  [{}]",
        crop.id.to_string(),
        crop.name,
        crop.crop_type,
        crop.stage().to_string(),
        crop.harvest_date,
        crop.expiry_date,
        crop.freshness(today)
    );
}

fn print_provenance(crop: &Crop) {
    println!("{} ({})", crop.name, crop.crop_type);
    println!("  harvested {}  expires {}", crop.harvest_date, crop.expiry_date);
    println!("  soil: {}  pesticides: {}", crop.soil_type, crop.pesticides_used);

    if let Some(farmer) = &crop.farmer_info {
        let code = farmer.code.as_deref().unwrap_or("-");
        println!("  farmer:      {} [{}] at {}", farmer.name, code, farmer.location);
    }
    if let Some(distributor) = &crop.distributor_info {
        let code = distributor.code.as_deref().unwrap_or("-");
        let received = distributor
            .received_date
            .map_or_else(String::new, |d| format!(" received {d}"));
        println!(
            "  distributor: {} [{}] at {}{received}",
            distributor.name, code, distributor.location
        );
    }
    if let Some(retailer) = &crop.retailer_info {
        let name = retailer.name.as_deref().unwrap_or("-");
        println!(
            "  retailer:    {} at {} received {}",
            name, retailer.location, retailer.received_date
        );
    }
}
