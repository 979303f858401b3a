use super::*;
use Color as C;

fn mkimage<const W: usize, const H: usize>(data: [[Color; W]; H]) -> Image {
    let data = data
        .into_iter()
        .flat_map(|row| row.into_iter())
        .flat_map(|col| col.0)
        .collect::<Vec<_>>();
    Image::from_rgba8(Resolution::new(W as u32, H as u32), &data)
}

#[test]
fn packed_channel_constructors() {
    let rgb = Image::from_rgb8(Resolution::new(2, 1), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(rgb.get(0, 0), C::from_rgb8(1, 2, 3));
    assert_eq!(rgb.get(1, 0), C::from_rgb8(4, 5, 6));

    // BGR input is the same data with the first and third channel swapped.
    let bgr = Image::from_bgr8(Resolution::new(2, 1), &[3, 2, 1, 6, 5, 4]);
    assert_eq!(bgr, rgb);
}

#[test]
fn set_clips_against_bounds() {
    let mut image = mkimage([[C::BLACK, C::BLACK], [C::BLACK, C::BLACK]]);
    let orig = image.clone();

    image.set(-1, 0, C::WHITE);
    image.set(0, -1, C::WHITE);
    image.set(2, 0, C::WHITE);
    image.set(0, 2, C::WHITE);
    assert_eq!(image, orig);

    image.set(1, 1, C::WHITE);
    assert_eq!(image.get(1, 1), C::WHITE);
}

#[test]
fn marker_fills_center_pixel() {
    let mut image = Image::new(9, 9);
    draw::marker(&mut image, 4, 4);
    assert_eq!(image.get(4, 4), C::MAGENTA);

    let mut image = Image::new(9, 9);
    draw::marker(&mut image, 4, 4).diameter(1).color(C::CYAN);
    assert_eq!(image.get(4, 4), C::CYAN);
    assert_eq!(image.get(5, 4), C::NONE);
}

#[test]
fn drawing_tolerates_out_of_bounds_positions() {
    let mut image = Image::new(4, 4);
    let orig = image.clone();

    draw::marker(&mut image, -100, -100);
    draw::line(&mut image, -10, -10, -20, -20);
    assert_eq!(image, orig);

    // A line crossing the image must only touch in-bounds pixels.
    draw::line(&mut image, -4, 0, 7, 0).color(C::RED);
    assert_eq!(image.get(0, 0), C::RED);
    assert_eq!(image.get(3, 0), C::RED);
    assert_eq!(image.get(0, 1), C::NONE);
}

#[test]
fn text_marks_pixels() {
    let mut image = Image::new(40, 20);
    draw::text(&mut image, 20, 10, "FPS: 30").color(C::WHITE);
    assert!(
        image.data().chunks_exact(4).any(|px| px == [255, 255, 255, 255]),
        "text did not modify any pixel"
    );
}

#[test]
fn empty_image() {
    assert!(Image::new(0, 0).is_empty());
    assert!(Image::new(10, 0).is_empty());
    assert!(!Image::new(1, 1).is_empty());
}
