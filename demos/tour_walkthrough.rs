#![allow(clippy::cast_precision_loss)]
//! Demo walking a synthetic capture tour end to end.
//!
//! Builds a ring of capture positions, enters the panorama at the first
//! one, activates the hotspot toward its nearest neighbor, and drives the
//! frame loop through the full animated transition, printing the state
//! machine's progress. Run with `RUST_LOG=debug` to see the internal logs.

use std::f32::consts::TAU;
use std::sync::Arc;

use panoscope::{
    EntryState, NavOptions, NopDebugSink, PanoramaSession, PoseRecord, Result, Tour, TourOptions,
};

/// Number of capture positions on the ring.
const RING_CAMERAS: u32 = 8;

/// Ring radius in source units.
const RING_RADIUS: f32 = 3.0;

/// Builds pose records on a circle in the source ground plane (Z up).
fn ring_records() -> Vec<PoseRecord> {
    (0..RING_CAMERAS)
        .map(|index| {
            let angle = TAU * index as f32 / RING_CAMERAS as f32;
            let x = RING_RADIUS * angle.cos();
            let y = RING_RADIUS * angle.sin();
            let transform =
                format!("1 0 0 {x}  0 1 0 {y}  0 0 1 1.6  0 0 0 1");
            PoseRecord::new(index, format!("ring_frame_{index}"), transform)
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let tour = Arc::new(Tour::from_records(
        &ring_records(),
        &TourOptions::default(),
        "ring_scene.glb",
    )?);
    println!("tour: {} viewpoints, model '{}'", tour.len(), tour.model_ref());

    let options = NavOptions::default();
    let mut session = PanoramaSession::enter(
        Arc::clone(&tour),
        0,
        None,
        options.clone(),
        Box::new(NopDebugSink),
        0.0,
    )?;

    let nearest = tour.neighbors_of(0, 1)?[0].id;
    println!("entering viewpoint 0, activating hotspot toward {nearest}");
    session.activate_hotspot(nearest, 0.0)?;

    // Drive the frame loop at 60 fps until the crossfade hands off.
    let mut now = 0.0;
    let mut frame_count = 0_u32;
    let request = loop {
        now += 1.0 / 60.0;
        frame_count += 1;
        let output = session.frame(now)?;
        if let Some(request) = output.switch {
            break request;
        }
        if frame_count % 12 == 0 {
            println!(
                "  t={now:.2}s  yaw={:.1}  fov={:.1}  opacity={:.2}  hotspots={}",
                session.view().yaw(),
                session.view().fov(),
                output.overlay_opacity,
                session.hotspots().len(),
            );
        }
    };
    println!(
        "handoff at t={now:.2}s: switch to viewpoint {} (incoming fov {:.1})",
        request.target_id,
        request.incoming_fov.unwrap_or(options.normal_fov),
    );

    // The host would now fetch the panorama image and rebuild the viewer;
    // here we just resume with a fresh session on the new viewpoint.
    let mut session = PanoramaSession::enter(
        tour,
        request.target_id,
        Some(EntryState::from(&request)),
        options,
        Box::new(NopDebugSink),
        now,
    )?;
    while session.is_transitioning() {
        now += 1.0 / 60.0;
        session.frame(now)?;
    }
    println!(
        "settled on viewpoint {} at t={now:.2}s with fov {:.1}",
        session.viewpoint_id(),
        session.view().fov(),
    );
    Ok(())
}
