//! A small two-lift resort.
//!
//! ```text
//!            B top ───traverse───▶ A top
//!           ╱  │ ╲                ╱  │ ╲
//!      chute summit  lift B   meadow ridge lift A
//!           ╲  │ ╱                ╲  │ ╱
//!            B base ◀─────ridge──── A base     lodge
//! ```

use anyhow::Result;
use piste_core::{LodgeId, TrailClass, Vec3};
use piste_network::{SkiNetwork, SkiNetworkBuilder};

pub const A_BASE: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const A_TOP:  Vec3 = Vec3::new(0.0, 300.0, 1_200.0);
pub const B_BASE: Vec3 = Vec3::new(400.0, 0.0, 50.0);
pub const B_TOP:  Vec3 = Vec3::new(600.0, 450.0, 1_500.0);

/// Build the resort.  Returns the network and its single lodge.
pub fn build_network() -> Result<(SkiNetwork, LodgeId)> {
    let mut b = SkiNetworkBuilder::new();

    b.add_lift(A_BASE, A_TOP, 30.0)?;
    b.add_lift(B_BASE, B_TOP, 25.0)?;

    b.add_trail(TrailClass::Green, vec![A_TOP, Vec3::new(-150.0, 150.0, 600.0), Vec3::new(5.0, 0.0, 8.0)], 40.0)?;
    b.add_trail(TrailClass::Blue, vec![A_TOP, Vec3::new(200.0, 150.0, 700.0), Vec3::new(395.0, 0.0, 55.0)], 30.0)?;
    b.add_trail(TrailClass::Black, vec![B_TOP, Vec3::new(500.0, 250.0, 900.0), Vec3::new(405.0, 0.0, 60.0)], 20.0)?;
    b.add_trail(
        TrailClass::DoubleBlack,
        vec![B_TOP, Vec3::new(700.0, 300.0, 1_000.0), Vec3::new(398.0, 0.0, 45.0)],
        15.0,
    )?;
    b.add_trail(TrailClass::Blue, vec![B_TOP, Vec3::new(300.0, 380.0, 1_350.0), Vec3::new(8.0, 305.0, 1_195.0)], 25.0)?;

    let lodge = b.add_lodge(Vec3::new(200.0, 0.0, -50.0));
    Ok((b.build(), lodge))
}
