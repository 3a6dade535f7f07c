//! howitzer-sim: headless run of a scripted engagement.
//!
//! Usage: `howitzer-sim [config.ron]`. Without an argument, `howitzer.ron` in the
//! current directory is used if present, otherwise built-in defaults.

use anyhow::{Context, Result};
use engine_core::{Clock, ManualClock};
use howitzer::{FiringStatus, PowderKind, Session, SimConfig, SimEvent};
use std::path::PathBuf;
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);
const RUN_TIME: Duration = Duration::from_secs(90);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => SimConfig::load_from(&path).with_context(|| format!("loading {}", path.display()))?,
        None => SimConfig::load(),
    };
    let mut session = Session::new(&config).context("building session")?;
    log::info!("Starting howitzer simulation ({} s of game time)", RUN_TIME.as_secs());

    // Traverse toward the range and set a light north-easterly wind.
    session.rotate_emplacement(90.0);
    session.set_wind(45.0, 0.05);

    let mut clock = ManualClock::new();
    let (mut fired, mut hits, mut impacts) = (0u32, 0u32, 0u32);

    while clock.now() < RUN_TIME {
        let now = clock.now();
        session.tick(now);

        match session.status(now) {
            FiringStatus::Ready => {
                if session.fire(now).is_ok() {
                    fired += 1;
                    if fired == 6 {
                        session.set_powder(PowderKind::Black);
                        session.set_elevation(5.0);
                    }
                }
            }
            FiringStatus::BarrelWorn => {
                if session.start_repair(now).is_ok() {
                    session.set_powder(PowderKind::Nitro);
                    session.set_elevation(-5.0);
                }
            }
            FiringStatus::Reloading | FiringStatus::Repairing => {}
        }

        for event in session.drain_events() {
            match event {
                SimEvent::TargetHit { target, position, .. } => {
                    hits += 1;
                    log::info!("HIT target {} at ({:.1}, {:.1}, {:.1})", target.0, position.x, position.y, position.z);
                }
                SimEvent::GroundImpact { position, .. } => {
                    impacts += 1;
                    log::info!("Impact at ({:.1}, {:.1})", position.x, position.z);
                }
                other => log::debug!("{:?}", other),
            }
        }

        clock.advance(FRAME);
    }

    println!("Shots fired:     {fired}");
    println!("Target hits:     {hits}");
    println!("Ground impacts:  {impacts}");
    println!("Shells in air:   {}", session.projectile_positions().len());
    println!("Barrel wear:     {:.0}%", session.barrel_wear_percent());
    println!("Craters:         {}", session.effects().craters().len());
    Ok(())
}
