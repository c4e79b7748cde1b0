use sheetdxf_algo::{classify_loops, distinct_ring, outer_index, shoelace_area};
use sheetdxf_core::geom::Vec2;
use sheetdxf_core::model::LoopRole;

fn rect(x0: f64, y0: f64, w: f64, h: f64) -> Vec<Vec2> {
    vec![
        Vec2::new(x0, y0),
        Vec2::new(x0 + w, y0),
        Vec2::new(x0 + w, y0 + h),
        Vec2::new(x0, y0 + h),
    ]
}

fn reversed(mut pts: Vec<Vec2>) -> Vec<Vec2> {
    pts.reverse();
    pts
}

#[test]
fn shoelace_sign_follows_orientation() {
    let ccw = rect(0.0, 0.0, 4.0, 3.0);
    assert_eq!(12.0, shoelace_area(&ccw));
    assert_eq!(-12.0, shoelace_area(&reversed(ccw)));

    let triangle = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
    assert_eq!(0.5, shoelace_area(&triangle));
}

#[test]
fn fewer_than_three_points_have_no_area() {
    assert_eq!(0.0, shoelace_area(&[]));
    assert_eq!(0.0, shoelace_area(&[Vec2::new(1.0, 1.0), Vec2::new(5.0, 2.0)]));
}

#[test]
fn largest_absolute_area_is_outer() {
    // Absolute areas 50, 200, 30.
    let rings = vec![
        rect(0.0, 0.0, 5.0, 10.0),
        rect(-20.0, -20.0, 10.0, 20.0),
        rect(30.0, 30.0, 5.0, 6.0),
    ];
    let loops = classify_loops(&rings);

    assert_eq!(3, loops.len());
    assert_eq!(LoopRole::Inner, loops[0].role);
    assert_eq!(LoopRole::Outer, loops[1].role);
    assert_eq!(LoopRole::Inner, loops[2].role);
    assert_eq!(Some(1), outer_index(&loops));
    assert_eq!(200.0, loops[1].abs_area());
}

#[test]
fn orientation_does_not_affect_selection() {
    let rings = vec![
        rect(2.0, 2.0, 1.0, 1.0),
        reversed(rect(0.0, 0.0, 10.0, 10.0)),
        rect(5.0, 5.0, 2.0, 2.0),
    ];
    let loops = classify_loops(&rings);

    assert!(loops[1].signed_area < 0.0);
    assert_eq!(Some(1), outer_index(&loops));
    assert_eq!(1, loops.iter().filter(|l| l.is_outer()).count());
}

#[test]
fn ties_go_to_the_earlier_loop() {
    let rings = vec![
        rect(0.0, 0.0, 1.0, 1.0),
        rect(10.0, 0.0, 2.0, 2.0),
        reversed(rect(20.0, 0.0, 2.0, 2.0)),
    ];
    let loops = classify_loops(&rings);
    assert_eq!(Some(1), outer_index(&loops));
    assert_eq!(LoopRole::Inner, loops[2].role);
}

#[test]
fn exactly_one_outer_for_any_non_empty_set() {
    for n in 1..8 {
        let rings: Vec<Vec<Vec2>> = (0..n)
            .map(|i| rect(i as f64 * 100.0, 0.0, 1.0 + (i * 7 % 5) as f64, 2.0))
            .collect();
        let loops = classify_loops(&rings);
        assert_eq!(1, loops.iter().filter(|l| l.is_outer()).count());

        let max = loops.iter().map(|l| l.abs_area()).fold(0.0, f64::max);
        let outer = &loops[outer_index(&loops).expect("outer loop")];
        assert_eq!(max, outer.abs_area());
    }
}

#[test]
fn no_loops_means_no_tags() {
    let rings: Vec<Vec<Vec2>> = Vec::new();
    let loops = classify_loops(&rings);
    assert!(loops.is_empty());
    assert_eq!(None, outer_index(&loops));
}

#[test]
fn loop_keeps_its_points() {
    let ring = rect(1.0, 2.0, 3.0, 4.0);
    let loops = classify_loops(&[ring.clone()]);
    assert_eq!(ring, loops[0].points);
    assert_eq!(LoopRole::Outer, loops[0].role);
}

#[test]
fn distinct_ring_drops_repeats_and_closing_vertices() {
    let eps = 1e-6;
    let closed_twice = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(4.0, 0.0),
        Vec2::new(4.0, 0.0),
        Vec2::new(4.0, 3.0),
        Vec2::new(0.0, 0.0),
    ];
    assert_eq!(
        vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(4.0, 3.0)],
        distinct_ring(&closed_twice, eps)
    );

    // Three vertices, the last repeating the first: only two corners.
    let sliver = [Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0), Vec2::new(0.0, 0.0)];
    assert_eq!(2, distinct_ring(&sliver, eps).len());

    assert_eq!(1, distinct_ring(&[Vec2::new(1.0, 1.0); 4], eps).len());
    assert!(distinct_ring(&[], eps).is_empty());
}
