use refframe::{FrameFamily, FrameHop, FrameOps, Orientation, Pose, Position};
use std::f64::consts::FRAC_PI_2;
use uom::si::angle::degree;

fn main() {
    // a camera on a tripod: anchored at a surveyed location, yawed to look east and tilted 10°
    // downwards
    let tripod = Pose::from_components(
        47.994_821_1, // latitude
        7.821_160_6,  // longitude
        1_000.,       // altitude
        0.,
        -10f64.to_radians(),
        FRAC_PI_2,
    );
    let camera_in_world = FrameHop::new(FrameOps::gps(), FrameOps::cartesian(), tripod, true);

    // the camera sees something 250m straight down its optical axis
    let mut target = Pose::new(Position::new(250., 0., 0.), Orientation::ZERO);
    camera_in_world
        .pose_to_origin(&mut target)
        .expect("Cartesian frames can live in GPS origins");

    println!("target is at {}", target.position);
    assert!(target.position.y > 7.821_160_6, "east of the tripod");
    assert!(target.position.z < 1_000., "and below it");

    // how far away is that, as the crow flies?
    let distance = FrameOps::gps().distance(
        &Position::new(tripod.position.x, tripod.position.y, tripod.position.z),
        &target.position,
    );
    println!("{distance:.1}m from the tripod");
    assert!((distance - 250.).abs() < 1.);

    // the target inherits the camera's heading
    let heading = FrameOps::cartesian().angle(&target.orientation, &Orientation::ZERO);
    println!("{:.1}° off north-east-down", heading.get::<degree>());

    // and back into the camera frame it goes
    camera_in_world
        .pose_from_origin(&mut target)
        .expect("and back again");
    assert!((target.position.x - 250.).abs() < 1e-6);

    // a GPS frame can't be placed inside the camera's frame though
    let err = FrameHop::new(FrameOps::cartesian(), FrameOps::gps(), tripod, true)
        .pose_to_origin(&mut target)
        .unwrap_err();
    assert_eq!(err.this_family(), FrameFamily::Gps);
    println!("{err}");
}
