use clap::Parser;
use encoding_rs::Encoding;
use engine::api::{RegenConfig, parse_actor, simulate_with_actor};
use engine::content::builtin_actors;
use engine::resources::ResourceKey;
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(name = "regen-sample")]
#[command(about = "Distribution check: many seeded regeneration submissions")]
struct Args {
    /// Builtin actor id (ignored when --file is set)
    #[arg(long, default_value = "warrior")]
    id: String,

    /// Optional actor JSON/YAML file (BOM-aware decode, UTF-8 fallback)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Number of trials (trial i uses seed+i)
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG base seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Resources to uncheck before each submission (LP/AE/KE)
    #[arg(long)]
    decline: Vec<String>,
}

#[derive(serde::Serialize)]
struct Summary {
    trials: u32,
    dice_rolled: u32,
    declined_zeroes: u32,
    die_histogram: [u32; 6],
}

/// Actor exports from the host are not always UTF-8.
fn read_text_auto(path: &std::path::Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        return Ok(cow.into_owned());
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let decline: Vec<ResourceKey> = args
        .decline
        .iter()
        .map(|label| {
            ResourceKey::from_label(label)
                .ok_or_else(|| anyhow::anyhow!("unknown resource '{label}'"))
        })
        .collect::<anyhow::Result<_>>()?;

    let actor = match &args.file {
        Some(path) => {
            let text = read_text_auto(path)?;
            parse_actor(&path.to_string_lossy(), &text)?
        }
        None => {
            let raw = builtin_actors()
                .get(args.id.as_str())
                .copied()
                .ok_or_else(|| anyhow::anyhow!("unknown builtin actor '{}'", args.id))?;
            serde_json::from_str(raw)?
        }
    };

    let mut summary = Summary {
        trials: args.trials,
        dice_rolled: 0,
        declined_zeroes: 0,
        die_histogram: [0; 6],
    };
    for trial in 0..args.trials {
        let cfg = RegenConfig {
            actor_path: None,
            actor_id: None,
            seed: args.seed.wrapping_add(u64::from(trial)),
            decline: decline.clone(),
            title: None,
            template: None,
        };
        let report = simulate_with_actor(cfg, actor.clone())?;
        for roll in &report.rolls {
            for &value in &roll.results {
                summary.dice_rolled += 1;
                if value == 0 {
                    summary.declined_zeroes += 1;
                } else if (1..=6).contains(&value) {
                    summary.die_histogram[(value - 1) as usize] += 1;
                }
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
