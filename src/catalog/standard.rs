//! Built-in reference tables.

use super::{
    Breaker, Busbar, CableDimension, CableTray, CatalogTables, ConduitRow, DcCable, WireAmpacity,
};

const fn tray(width_mm: u32, height_mm: u32) -> CableTray {
    let area_mm2 = width_mm * height_mm;
    CableTray {
        width_mm,
        height_mm,
        area_mm2,
        allowable_area_mm2: area_mm2 / 5,
    }
}

const fn breaker(trip_at: u32, frame_af: u32) -> Breaker {
    Breaker { trip_at, frame_af }
}

const fn wire(size_mm2: u32, ampacity_3w: u32, ampacity_4w: u32) -> WireAmpacity {
    WireAmpacity {
        size_mm2,
        ampacity_3w,
        ampacity_4w,
    }
}

const fn dims(size_mm2: u32, single_core_od_mm: f64, multi_core_od_mm: f64) -> CableDimension {
    CableDimension {
        size_mm2,
        single_core_od_mm,
        multi_core_od_mm,
    }
}

const fn bar(width_mm: u32, thickness_mm: u32, conductors: u32, ampacity: u32) -> Busbar {
    Busbar {
        width_mm,
        thickness_mm,
        conductors,
        ampacity,
    }
}

const fn conduit(size_mm2: u32, diameters_mm: [u32; 5]) -> ConduitRow {
    ConduitRow {
        size_mm2,
        diameters_mm,
    }
}

const TRAYS: [CableTray; 7] = [
    tray(50, 50),
    tray(50, 100),
    tray(100, 100),
    tray(200, 100),
    tray(300, 100),
    tray(400, 100),
    tray(500, 100),
];

const BREAKERS: [Breaker; 29] = [
    breaker(3, 30),
    breaker(5, 30),
    breaker(10, 30),
    breaker(15, 30),
    breaker(20, 30),
    breaker(30, 30),
    breaker(40, 50),
    breaker(50, 50),
    breaker(60, 100),
    breaker(75, 100),
    breaker(100, 100),
    breaker(125, 125),
    breaker(150, 250),
    breaker(175, 250),
    breaker(200, 250),
    breaker(225, 250),
    breaker(250, 250),
    breaker(300, 400),
    breaker(350, 400),
    breaker(400, 400),
    breaker(500, 630),
    breaker(600, 630),
    breaker(630, 630),
    breaker(700, 800),
    breaker(800, 800),
    breaker(1000, 1000),
    breaker(1200, 1200),
    breaker(1400, 1600),
    breaker(1600, 1600),
];

// 4-wire ampacity is not tabulated for 400 and 500 mm².
const WIRES: [WireAmpacity; 14] = [
    wire(14, 74, 67),
    wire(22, 93, 84),
    wire(38, 130, 117),
    wire(50, 155, 140),
    wire(60, 176, 159),
    wire(80, 208, 187),
    wire(100, 242, 218),
    wire(125, 277, 249),
    wire(150, 309, 278),
    wire(200, 359, 323),
    wire(250, 412, 371),
    wire(325, 469, 422),
    wire(400, 530, 0),
    wire(500, 579, 0),
];

const CABLE_DIMENSIONS: [CableDimension; 15] = [
    dims(14, 8.7, 21.0),
    dims(22, 9.8, 24.0),
    dims(30, 10.5, 25.7),
    dims(38, 11.9, 29.0),
    dims(50, 13.7, 32.0),
    dims(60, 14.6, 34.0),
    dims(80, 16.0, 38.0),
    dims(100, 17.4, 43.0),
    dims(125, 20.2, 47.0),
    dims(150, 21.7, 51.0),
    dims(200, 23.6, 55.0),
    dims(250, 25.9, 60.0),
    dims(325, 29.1, 70.0),
    dims(400, 32.0, 0.0),
    dims(500, 34.5, 0.0),
];

// Listed in the published order, which is not sorted by ampacity.
const BUSBARS: [Busbar; 21] = [
    bar(15, 2, 1, 130),
    bar(15, 3, 1, 155),
    bar(20, 2, 1, 175),
    bar(20, 3, 1, 220),
    bar(20, 5, 1, 285),
    bar(25, 3, 1, 250),
    bar(25, 5, 1, 325),
    bar(30, 3, 1, 305),
    bar(30, 5, 1, 370),
    bar(30, 5, 2, 670),
    bar(40, 5, 1, 420),
    bar(40, 5, 2, 800),
    bar(40, 10, 1, 715),
    bar(40, 10, 2, 1230),
    bar(50, 5, 1, 585),
    bar(50, 5, 2, 1030),
    bar(50, 10, 1, 875),
    bar(50, 10, 2, 1600),
    bar(60, 5, 1, 700),
    bar(60, 8, 1, 875),
    bar(60, 10, 1, 1000),
];

const CONDUITS: [ConduitRow; 16] = [
    conduit(8, [16, 22, 22, 28, 28]),
    conduit(14, [16, 22, 28, 28, 36]),
    conduit(22, [16, 28, 28, 36, 42]),
    conduit(30, [16, 36, 36, 36, 42]),
    conduit(38, [22, 36, 36, 42, 54]),
    conduit(50, [22, 36, 42, 54, 54]),
    conduit(60, [22, 42, 42, 54, 70]),
    conduit(80, [28, 42, 54, 54, 70]),
    conduit(100, [28, 54, 54, 70, 70]),
    conduit(125, [36, 54, 70, 70, 82]),
    conduit(150, [36, 70, 70, 82, 82]),
    conduit(200, [36, 70, 70, 82, 92]),
    conduit(250, [42, 82, 82, 92, 104]),
    conduit(325, [54, 82, 92, 104, 0]),
    conduit(400, [54, 92, 92, 0, 0]),
    conduit(500, [54, 104, 104, 0, 0]),
];

pub(super) fn tables() -> CatalogTables {
    CatalogTables {
        dc_cable: DcCable {
            cross_section_mm2: 4,
            outer_diameter_mm: 7.54,
        },
        trays: TRAYS.to_vec(),
        breakers: BREAKERS.to_vec(),
        wires: WIRES.to_vec(),
        cable_dimensions: CABLE_DIMENSIONS.to_vec(),
        busbars: BUSBARS.to_vec(),
        conduits: CONDUITS.to_vec(),
    }
}
