//! Pixel buffer regression test
//!
//! Covers 5D addressing of the in-memory store, plane retrieval, bounds
//! rejection, tiled-set flagging, and the buffer-close guarantees of the
//! guard.

use roistat_pixels::{
    InMemoryPixelSet, InMemoryPixelStore, PixelDims, PixelSource, PixelsError, PixelsId,
};
use roistat_test::{RegParams, ramp_plane};

#[test]
fn pixels_reg() {
    let mut rp = RegParams::new("pixels");

    // --- Test 1: Ramp plane addressing ---
    let mut store = InMemoryPixelStore::new();
    store.insert(PixelsId(1), ramp_plane(4, 4).unwrap());
    let buf = store.open(PixelsId(1)).unwrap();
    rp.compare_values(1.0, buf.get_value(0, 0, 0, 0, 0).unwrap(), 0.0);
    rp.compare_values(6.0, buf.get_value(1, 1, 0, 0, 0).unwrap(), 0.0);
    rp.compare_values(16.0, buf.get_value(3, 3, 0, 0, 0).unwrap(), 0.0);

    // --- Test 2: Plane retrieval matches point access ---
    let plane = buf.get_plane(0, 0, 0).unwrap();
    rp.compare_values(4.0, plane.size_x() as f64, 0.0);
    rp.compare_values(7.0, plane.get(2, 1).unwrap(), 0.0);
    rp.compare_values(7.0, plane.get_index(6).unwrap(), 0.0);

    // --- Test 3: Out-of-range plane coordinates rejected ---
    let oob = buf.get_plane(0, 1, 0);
    rp.compare_values(1.0, if oob.is_err() { 1.0 } else { 0.0 }, 0.0);
    let oob = buf.get_value(4, 0, 0, 0, 0);
    rp.compare_values(1.0, if oob.is_err() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 4: Guard closes on drop ---
    drop(buf);
    rp.compare_values(0.0, store.open_buffers() as f64, 0.0);

    // --- Test 5: Explicit close reported once ---
    let buf = store.open(PixelsId(1)).unwrap();
    rp.compare_values(1.0, store.open_buffers() as f64, 0.0);
    let closed = buf.close();
    rp.compare_values(1.0, if closed.is_ok() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, store.open_buffers() as f64, 0.0);

    // --- Test 6: Tiled pixel sets are flagged ---
    let mut store = InMemoryPixelStore::new();
    store.insert(
        PixelsId(2),
        InMemoryPixelSet::new(PixelDims::plane(8, 8)).tiled(),
    );
    rp.compare_values(
        1.0,
        if store.needs_pyramid(PixelsId(2)).unwrap() {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    // --- Test 7: Unknown pixel set is DataUnavailable ---
    let missing = store.open(PixelsId(42));
    let is_unavailable = matches!(missing, Err(PixelsError::DataUnavailable(_)));
    rp.compare_values(1.0, if is_unavailable { 1.0 } else { 0.0 }, 0.0);

    // --- Test 8: Multi-plane 5D addressing ---
    let dims = PixelDims::new(2, 2, 3, 2, 2);
    let mut set = InMemoryPixelSet::new(dims);
    set.set_value(1, 0, 2, 1, 1, 99.0);
    let mut store = InMemoryPixelStore::new();
    store.insert(PixelsId(3), set);
    let buf = store.open(PixelsId(3)).unwrap();
    rp.compare_values(99.0, buf.get_value(1, 0, 2, 1, 1).unwrap(), 0.0);
    rp.compare_values(0.0, buf.get_value(1, 0, 2, 1, 0).unwrap(), 0.0);

    assert!(rp.cleanup());
}
