use benchtop_core::*;

fn board(width: u32) -> FeatureStore {
    let mut s = FeatureStore::default();
    s.set_board_width(width).unwrap();
    s
}

#[test]
fn test_centered_tap_report() {
    let mut s = board(1200);
    s.set_hole(HoleSlot::Tap1, Some(0.0), Some(232.5));
    assert_eq!(
        report_lines(&s),
        ["Tap 1 Hole: 0mm from benchtop center, 232.5mm from back. Diameter 35mm."]
    );
}

#[test]
fn test_left_waste_report() {
    let mut s = FeatureStore::new(Box::new(FixedWaste(70.0)));
    s.set_hole(HoleSlot::Waste1, Some(-100.0), Some(100.0));
    let r = report(&s);
    assert!(r.contains("100mm LEFT of benchtop center."), "{r}");
    assert!(r.ends_with("Diameter 70mm."));
}

#[test]
fn test_clear_removes_from_report() {
    let mut s = board(900);
    s.set_hole(HoleSlot::Waste1, Some(20.0), Some(200.0));
    assert!(s.has_hole(HoleSlot::Waste1));
    s.clear_hole(HoleSlot::Waste1);
    assert!(!s.has_hole(HoleSlot::Waste1));
    assert!(report(&s).is_empty());
}

#[test]
fn test_corner_radius_clamps() {
    let mut s = board(900);
    s.set_basin(BasinSpec {
        shape: BasinShape::Square { side: Some(300.0) },
        offset_x: None,
        offset_y: None,
    });
    assert_eq!(s.set_corner_radius(200.0), 150.0);
    assert_eq!(s.set_corner_radius(40.0), 40.0);
    assert_eq!(s.set_corner_radius(-5.0), 0.0);
    for r in [0.0, 10.0, 99.5, 149.9, 150.0, 150.1, 1e9] {
        assert!(s.set_corner_radius(r) <= 150.0);
    }
}

#[test]
fn test_report_order_is_fixed() {
    let mut s = board(1500);
    s.set_double_mode(true);
    s.set_cutout(Cutout {
        shape: CutoutShape::Circle,
        length: Some(200.0),
        offset_y: 240.0,
        ..Default::default()
    });
    s.set_basin(BasinSpec {
        shape: BasinShape::Circle { diameter: Some(400.0) },
        offset_x: Some(10.0),
        offset_y: Some(240.0),
    });
    s.set_hole(HoleSlot::Waste2, Some(300.0), Some(200.0));
    s.set_hole(HoleSlot::Tap2, Some(300.0), Some(60.0));
    s.set_hole(HoleSlot::Waste1, Some(-300.0), Some(200.0));
    s.set_hole(HoleSlot::Tap1, Some(-300.0), Some(60.0));

    let prefixes: Vec<String> = report_lines(&s)
        .iter()
        .map(|l| l.split(':').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        prefixes,
        [
            "Tap 1 Hole",
            "Waste 1 Hole",
            "Tap 2 Hole",
            "Waste 2 Hole",
            "Basin (circle)",
            "Cut-out",
        ]
    );
}

#[test]
fn test_locked_drag_is_rigid() {
    let mut s = board(1800);
    s.set_double_mode(true);
    s.set_hole(HoleSlot::Tap1, Some(-400.0), Some(50.0));
    s.set_hole(HoleSlot::Waste1, Some(-400.0), Some(220.0));
    s.set_hole(HoleSlot::Tap2, Some(400.0), Some(50.0));
    s.set_hole(HoleSlot::Waste2, Some(400.0), Some(220.0));
    s.set_locked(true);

    let before: Vec<_> = s.holes().collect();
    let frame = s.frame(constants::CANVAS_WIDTH_PX);
    let grab = frame.to_screen(Point::new(-400.0, 50.0));

    let mut p = PointerHandler::new(constants::CANVAS_WIDTH_PX);
    assert_eq!(
        p.pointer_down(&s, grab.x, grab.y),
        Some(DragTarget::Hole(HoleSlot::Tap1))
    );
    for (x, y) in [(grab.x + 13.0, grab.y + 7.5), (grab.x - 40.2, grab.y + 30.0)] {
        assert!(p.pointer_move(&mut s, x, y));
    }
    p.pointer_up();

    let after: Vec<_> = s.holes().collect();
    assert_eq!(before.len(), after.len());
    for i in 0..before.len() {
        for j in 0..before.len() {
            let (_, a0) = before[i];
            let (_, b0) = before[j];
            let (_, a1) = after[i];
            let (_, b1) = after[j];
            assert_eq!(a0.offset_x - b0.offset_x, a1.offset_x - b1.offset_x);
            assert_eq!(a0.offset_y - b0.offset_y, a1.offset_y - b1.offset_y);
        }
    }
    assert_ne!(before[0].1, after[0].1);
}

#[test]
fn test_disabling_double_clears_second_pair() {
    let mut s = board(1200);
    assert!(s.set_double_mode(true));
    s.set_hole(HoleSlot::Tap2, Some(250.0), Some(60.0));
    s.set_hole(HoleSlot::Waste2, Some(250.0), Some(200.0));
    s.set_hole(HoleSlot::Tap1, Some(-250.0), Some(60.0));
    assert!(!s.set_double_mode(false));
    assert!(!s.has_hole(HoleSlot::Tap2));
    assert!(!s.has_hole(HoleSlot::Waste2));
    let r = report(&s);
    assert!(!r.contains("Tap 2") && !r.contains("Waste 2"));
    assert!(r.contains("Tap 1"));
}

#[test]
fn test_mm_px_round_trip() {
    for width in constants::BOARD_WIDTHS_MM {
        let f = BoardFrame::new(constants::CANVAS_WIDTH_PX, width as f64);
        let half = width as i32 / 2;
        for x in (-half..=half).step_by(7) {
            for y in (0..=465).step_by(31) {
                let mm = Point::new(x as f64, y as f64);
                let px = f.to_screen(mm);
                assert_eq!(f.snap_from_screen(px.x, px.y), mm);
            }
        }
    }
}

#[test]
fn test_render_and_report_agree_on_cutout() {
    let mut s = board(1200);
    let row: CatalogRow = serde_json::from_str(
        r#"{
            "Item Code": "CO-2",
            "cut_out": "Y",
            "setCutout": "rect",
            "c_l": 400, "c_w": 300, "c_x": 0, "c_y": 230,
            "2_c_x": 140, "2_c_y": 250
        }"#,
    )
    .unwrap();
    placement::apply_selection(
        &mut s,
        &row,
        TapOrientation::Clock(ClockPosition::Two),
        false,
    );
    let mut list = DrawList::new();
    render(&s, constants::CANVAS_WIDTH_PX, constants::CANVAS_HEIGHT_PX, &mut list);

    // width 300mm x length 400mm centered on (140, 250) mm
    let frame = s.frame(constants::CANVAS_WIDTH_PX);
    let c = frame.to_screen(Point::new(140.0, 250.0));
    assert!(list.ops.contains(&render::DrawOp::Rect(c.x - 75.0, c.y - 100.0, 150.0, 200.0)));
    assert_eq!(
        report(&s),
        "Cut-out: 400mm × 300mm, 140mm from center, 250mm from back"
    );
}
