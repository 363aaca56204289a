use rgb::alt::GrayAlpha;
use rgb::RGBA;
use spritequant::{
    color, convert_pixel_format, create_palette_from_images, DitheringMethod, Image, Palette,
    PixelFormat, RgbMap, MAX_PALETTE_SIZE,
};

const RED: RGBA<u8> = RGBA {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};
const TRANSPARENT: RGBA<u8> = RGBA {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

fn noise_image(seed: u32, width: usize, height: usize) -> Image {
    // Tiny LCG so the test data is deterministic but not flat
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        (state >> 24) as u8
    };
    let pixels = (0..width * height)
        .map(|_| RGBA::new(next(), next(), next(), 255))
        .collect();
    Image::from_rgb(width, height, pixels).unwrap()
}

#[test]
fn converting_to_own_format_is_identity() {
    let rgb = noise_image(7, 8, 8);
    let out = convert_pixel_format(
        &rgb,
        None,
        PixelFormat::Rgb,
        DitheringMethod::None,
        None,
        None,
        false,
    )
    .unwrap();
    assert_eq!(out.rgb_pixels().unwrap(), rgb.rgb_pixels().unwrap());

    let gray =
        Image::from_grayscale(2, 2, vec![GrayAlpha(1, 2), GrayAlpha(3, 4), GrayAlpha(5, 6), GrayAlpha(7, 8)])
            .unwrap();
    let out = convert_pixel_format(
        &gray,
        None,
        PixelFormat::Grayscale,
        DitheringMethod::None,
        None,
        None,
        false,
    )
    .unwrap();
    assert_eq!(out.grayscale_pixels().unwrap(), gray.grayscale_pixels().unwrap());
}

#[test]
fn indexed_round_trip_through_same_palette_is_identity() {
    // Re-palettizing against the same palette maps every index back to
    // itself when entries are distinct.
    let mut palette = Palette::new(4);
    palette.set_entry(1, RGBA::new(255, 0, 0, 255));
    palette.set_entry(2, RGBA::new(0, 255, 0, 255));
    palette.set_entry(3, RGBA::new(0, 0, 255, 255));
    let map = RgbMap::new(&palette, Some(0));

    let src = Image::from_indexed(2, 2, vec![1, 2, 3, 0]).unwrap();
    let out = convert_pixel_format(
        &src,
        None,
        PixelFormat::Indexed,
        DitheringMethod::None,
        Some(&map),
        Some(&palette),
        false,
    )
    .unwrap();
    assert_eq!(out.indexed_pixels().unwrap(), src.indexed_pixels().unwrap());
}

#[test]
fn round_trip_stays_within_palette() {
    // RGB -> Indexed -> RGB: every output pixel must be a palette entry, or
    // fully transparent where the source was transparent.
    let width = 16;
    let height = 16;
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            if (x + y) % 7 == 0 {
                pixels.push(TRANSPARENT);
            } else {
                pixels.push(RGBA::new((x * 16) as u8, (y * 16) as u8, 99, 255));
            }
        }
    }
    let src = Image::from_rgb(width, height, pixels).unwrap();

    let mut palette = Palette::new(16);
    create_palette_from_images(&[&src], &mut palette, false);
    let map = RgbMap::new(&palette, Some(0));

    let indexed = convert_pixel_format(
        &src,
        None,
        PixelFormat::Indexed,
        DitheringMethod::None,
        Some(&map),
        Some(&palette),
        false,
    )
    .unwrap();
    let restored = convert_pixel_format(
        &indexed,
        None,
        PixelFormat::Rgb,
        DitheringMethod::None,
        None,
        Some(&palette),
        false,
    )
    .unwrap();

    for (src_pixel, out_pixel) in src
        .rgb_pixels()
        .unwrap()
        .iter()
        .zip(restored.rgb_pixels().unwrap())
    {
        if src_pixel.a == 0 {
            assert_eq!(*out_pixel, TRANSPARENT);
        } else {
            let in_palette = palette
                .entries()
                .iter()
                .any(|e| e.r == out_pixel.r && e.g == out_pixel.g && e.b == out_pixel.b);
            assert!(in_palette, "output pixel {out_pixel:?} is not a palette entry");
        }
    }
}

#[test]
fn feeding_order_does_not_change_the_palette() {
    let a = noise_image(1, 8, 8);
    let b = noise_image(2, 8, 8);

    let mut forward = Palette::new(MAX_PALETTE_SIZE);
    create_palette_from_images(&[&a, &b], &mut forward, false);

    let mut reverse = Palette::new(MAX_PALETTE_SIZE);
    create_palette_from_images(&[&b, &a], &mut reverse, false);

    assert_eq!(forward, reverse);
}

#[test]
fn mask_pixels_become_transparent_on_non_background_layers() {
    let mut palette = Palette::new(3);
    palette.set_entry(0, RGBA::new(250, 250, 250, 255)); // mask entry has a color
    palette.set_entry(1, RGBA::new(20, 20, 20, 255));
    palette.set_entry(2, RGBA::new(90, 90, 90, 255));

    let mut src = Image::from_indexed(2, 2, vec![2, 0, 0, 1]).unwrap();
    src.set_mask_color(0);

    let out = convert_pixel_format(
        &src,
        None,
        PixelFormat::Rgb,
        DitheringMethod::None,
        None,
        Some(&palette),
        false,
    )
    .unwrap();

    let pixels = out.rgb_pixels().unwrap();
    assert_eq!(pixels[1].a, 0);
    assert_eq!(pixels[2].a, 0);
    assert_eq!(pixels[0].a, 255);
    assert_eq!(pixels[3].a, 255);
}

#[test]
fn palette_size_is_bounded_and_at_least_one() {
    let src = noise_image(3, 32, 32);

    for requested in [1usize, 2, 4, 16, 256] {
        let mut palette = Palette::new(requested);
        create_palette_from_images(&[&src], &mut palette, false);
        assert!(palette.len() <= requested, "requested {requested}");
        assert!(!palette.is_empty());
    }

    // Degenerate: nothing fed, palette still has one entry
    let mut palette = Palette::new(256);
    create_palette_from_images(&[], &mut palette, false);
    assert_eq!(palette.len(), 1);
}

#[test]
fn transparent_pixels_never_influence_the_palette() {
    // One opaque red pixel plus many transparent blue pixels: the palette
    // must reflect only the red.
    let mut pixels = vec![RGBA::new(0, 0, 255, 0); 63];
    pixels.push(RED);
    let src = Image::from_rgb(8, 8, pixels).unwrap();

    let mut palette = Palette::new(MAX_PALETTE_SIZE);
    create_palette_from_images(&[&src], &mut palette, false);

    assert_eq!(palette.len(), 2);
    assert_eq!(palette.entry(1), RED);
}

#[test]
fn red_sprite_scenario() {
    // 2x2 {red, red, red, transparent}, no background layer: index 0 stays
    // the mask sentinel, index 1 becomes pure red, and converting the image
    // to indexed yields {1, 1, 1, 0}.
    let src = Image::from_rgb(2, 2, vec![RED, RED, RED, TRANSPARENT]).unwrap();

    let mut palette = Palette::new(MAX_PALETTE_SIZE);
    create_palette_from_images(&[&src], &mut palette, false);

    assert_eq!(palette.len(), 2);
    assert_eq!(palette.entry(1), RED);

    let map = RgbMap::new(&palette, Some(0));
    let out = convert_pixel_format(
        &src,
        None,
        PixelFormat::Indexed,
        DitheringMethod::None,
        Some(&map),
        Some(&palette),
        false,
    )
    .unwrap();
    assert_eq!(out.indexed_pixels().unwrap(), &[1, 1, 1, 0]);
}

#[test]
fn solid_gray_scenario() {
    // A solid mid-gray RGB image converted to grayscale: every value equals
    // the HSV-value luma of that gray, alpha preserved.
    let gray = RGBA::new(128, 128, 128, 200);
    let src = Image::from_rgb(4, 4, vec![gray; 16]).unwrap();

    let out = convert_pixel_format(
        &src,
        None,
        PixelFormat::Grayscale,
        DitheringMethod::None,
        None,
        None,
        false,
    )
    .unwrap();

    let expected = color::luma_from_rgb(128, 128, 128);
    for pixel in out.grayscale_pixels().unwrap() {
        assert_eq!(pixel.0, expected);
        assert_eq!(pixel.1, 200);
    }
}
