use crate::map::{PropDescriptor, PropKind, Zone, ZoneArea};

use PropKind::*;

/// Fixed harbor layout. The lighthouse is listed first so its walls are the
/// first volumes a collision probe meets.
pub const STATIC_PROPS: &[PropDescriptor] = &[
    PropDescriptor::new(Lighthouse, 500.0, 400.0, 100.0, 200.0),
    PropDescriptor::new(Dock, 390.0, 780.0, 120.0, 200.0),
    PropDescriptor::new(Building, 850.0, 450.0, 75.0, 80.0),
    PropDescriptor::new(Building, 980.0, 450.0, 80.0, 85.0),
    PropDescriptor::new(Building, 1150.0, 450.0, 75.0, 75.0),
    PropDescriptor::new(Building, 1280.0, 450.0, 85.0, 80.0),
    PropDescriptor::new(Building, 850.0, 650.0, 85.0, 80.0),
    PropDescriptor::new(Building, 980.0, 650.0, 80.0, 75.0),
    PropDescriptor::new(Building, 1150.0, 650.0, 90.0, 85.0),
    PropDescriptor::new(Building, 1280.0, 650.0, 80.0, 75.0),
    PropDescriptor::new(Building, 680.0, 480.0, 80.0, 75.0),
    PropDescriptor::new(Building, 1400.0, 550.0, 85.0, 80.0),
    PropDescriptor::new(Sign, 800.0, 520.0, 40.0, 60.0),
    PropDescriptor::new(Sailboat, 320.0, 1000.0, 60.0, 40.0),
    PropDescriptor::new(Tree, 300.0, 300.0, 40.0, 60.0),
    PropDescriptor::new(Tree, 700.0, 200.0, 35.0, 50.0),
    PropDescriptor::new(Tree, 650.0, 400.0, 30.0, 45.0),
    PropDescriptor::new(Tree, 1500.0, 350.0, 35.0, 55.0),
    PropDescriptor::new(Tree, 380.0, 450.0, 45.0, 70.0),
    PropDescriptor::new(Tree, 650.0, 480.0, 25.0, 40.0),
    PropDescriptor::new(Tree, 420.0, 350.0, 32.0, 48.0),
    PropDescriptor::new(Tree, 780.0, 380.0, 38.0, 58.0),
    PropDescriptor::new(Tree, 1520.0, 480.0, 42.0, 65.0),
    PropDescriptor::new(Tree, 700.0, 700.0, 35.0, 45.0),
    PropDescriptor::new(Tree, 180.0, 600.0, 30.0, 50.0),
    PropDescriptor::new(Tree, 120.0, 400.0, 35.0, 55.0),
    PropDescriptor::new(Tree, 250.0, 750.0, 28.0, 45.0),
    PropDescriptor::new(Tree, 1600.0, 300.0, 40.0, 62.0),
    PropDescriptor::new(Tree, 1550.0, 700.0, 33.0, 48.0),
    PropDescriptor::new(Tree, 320.0, 580.0, 18.0, 25.0),
    PropDescriptor::new(Tree, 680.0, 320.0, 20.0, 30.0),
    PropDescriptor::new(Tree, 1600.0, 420.0, 22.0, 32.0),
    PropDescriptor::new(Lamppost, 350.0, 720.0, 12.0, 80.0),
    PropDescriptor::new(Lamppost, 870.0, 550.0, 12.0, 80.0),
    PropDescriptor::new(Lamppost, 1220.0, 480.0, 12.0, 80.0),
    PropDescriptor::new(Lamppost, 1220.0, 620.0, 12.0, 80.0),
    PropDescriptor::new(Lamppost, 920.0, 480.0, 12.0, 80.0),
    PropDescriptor::new(Rock, 150.0, 500.0, 30.0, 25.0),
    PropDescriptor::new(Rock, 780.0, 380.0, 25.0, 20.0),
];

/// Checked in order; the first containing area names the location.
pub const ZONES: &[ZoneArea] = &[
    ZoneArea::new(Zone::LighthouseEntrance, 400.0, 600.0, 300.0, 200.0),
    ZoneArea::new(Zone::LighthouseInterior, 450.0, 550.0, 200.0, 150.0),
    ZoneArea::new(Zone::HarborDocks, 340.0, 780.0, 220.0, 220.0),
    ZoneArea::new(Zone::TownSquare, 800.0, 400.0, 400.0, 400.0),
];
