//! Integration tests for the dirty/clean image cache of BitmapImage.

use bitmaprep::{
    BitmapImage, BitmapOptions, DrawingSurface, Filter, Frame, Image, ImageExt, ResourceBundle,
};

#[test]
fn test_initial_state_is_dirty() {
    let bmp = BitmapImage::new(4, 4).unwrap();
    assert!(bmp.is_dirty());

    let from_image = BitmapImage::from_image(&Image::filled(2, 2, [1; 4]).unwrap()).unwrap();
    assert!(from_image.is_dirty());
}

#[test]
fn test_export_cleans_and_is_stable_until_mutation() {
    let mut bmp = BitmapImage::new(4, 4).unwrap();
    let first = bmp.image().unwrap().clone();
    assert!(!bmp.is_dirty());

    // Repeated reads share the same snapshot
    assert!(bmp.image().unwrap().ptr_eq(&first));
    assert!(bmp.cg_image().unwrap().ptr_eq(&first));

    bmp.set_pixel_u8(1, 1, [9, 9, 9, 9]).unwrap();
    assert!(bmp.is_dirty());

    let second = bmp.image().unwrap().clone();
    assert!(!second.ptr_eq(&first));
    assert_eq!(second.pixel(1, 1).unwrap(), [9, 9, 9, 9]);
    // The old handle is an independent snapshot
    assert_eq!(first.pixel(1, 1).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn test_every_mutation_marks_dirty() {
    let mut bmp = BitmapImage::new(8, 8).unwrap();
    bmp.graphics_context().fill([100, 150, 200, 255]);

    let mutations: Vec<Box<dyn Fn(&mut BitmapImage)>> = vec![
        Box::new(|b: &mut BitmapImage| b.set_pixel(0, 0, [1.0, 0.0, 0.0, 1.0]).unwrap()),
        Box::new(|b: &mut BitmapImage| b.set_pixel_u8(0, 0, [1, 2, 3, 4]).unwrap()),
        Box::new(|b: &mut BitmapImage| b.set_brightness(0.5).unwrap()),
        Box::new(|b: &mut BitmapImage| b.invert_colors()),
        Box::new(|b: &mut BitmapImage| b.set_quality(0.5).unwrap()),
        Box::new(|b: &mut BitmapImage| b.set_size(6, 6).unwrap()),
        Box::new(|b: &mut BitmapImage| b.set_size_keeping_aspect_ratio(3, 6).unwrap()),
        Box::new(|b: &mut BitmapImage| b.set_size_filling_with_aspect(4, 4).unwrap()),
        Box::new(|b: &mut BitmapImage| b.set_needs_update()),
        Box::new(|b: &mut BitmapImage| {
            b.graphics_context();
        }),
    ];

    for mutate in &mutations {
        bmp.image().unwrap();
        assert!(!bmp.is_dirty());
        mutate(&mut bmp);
        assert!(bmp.is_dirty());
    }
}

#[test]
fn test_failed_operations_keep_state() {
    let mut bmp = BitmapImage::new(4, 4).unwrap();
    bmp.image().unwrap();

    assert!(bmp.set_pixel_u8(4, 0, [0; 4]).is_err());
    assert!(bmp.set_size(0, 4).is_err());
    assert!(bmp.set_quality(0.0).is_err());
    assert!(bmp.set_brightness(-1.0).is_err());
    assert!(!bmp.is_dirty());
    assert_eq!(bmp.dimensions(), (4, 4));
}

#[test]
fn test_external_paint_needs_update() {
    let mut bmp = BitmapImage::new(2, 2).unwrap();
    bmp.image().unwrap();

    let stamp = Image::filled(1, 1, [7, 7, 7, 255]).unwrap();
    bmp.graphics_context()
        .draw_image(&stamp, Frame::new(1, 0, 1, 1), None)
        .unwrap();

    assert!(bmp.is_dirty());
    assert_eq!(bmp.image().unwrap().pixel(1, 0).unwrap(), [7, 7, 7, 255]);
}

#[test]
fn test_new_bitmaps_start_dirty() {
    let mut bmp = BitmapImage::new(6, 4).unwrap();
    bmp.image().unwrap();
    let crop = bmp.crop_with_frame(Frame::new(0, 0, 2, 2)).unwrap();
    let rotated = bmp.rotate(30.0).unwrap();
    assert!(crop.is_dirty());
    assert!(rotated.is_dirty());
    assert!(!bmp.is_dirty());
}

#[test]
fn test_draw_in_rect_regenerates_source() {
    let mut src = BitmapImage::new(2, 2).unwrap();
    src.graphics_context().fill([255, 0, 0, 255]);
    assert!(src.is_dirty());

    let mut surface = DrawingSurface::allocate(4, 4).unwrap();
    src.draw_in_rect(&mut surface, Frame::new(0, 0, 4, 4)).unwrap();
    assert!(!src.is_dirty());
    assert_eq!(surface.buffer().pixel(3, 3).unwrap(), [255, 0, 0, 255]);
}

#[test]
fn test_options_flow_to_new_bitmaps() {
    let opts = BitmapOptions::from_yaml_str("filter: nearest").unwrap();
    let mut bmp = BitmapImage::with_options(2, 1, opts).unwrap();
    bmp.set_pixel_u8(0, 0, [0, 0, 0, 255]).unwrap();
    bmp.set_pixel_u8(1, 0, [255, 255, 255, 255]).unwrap();

    let crop = bmp.crop_with_frame(Frame::new(0, 0, 2, 1)).unwrap();
    assert_eq!(crop.options().filter, Filter::Nearest);

    // Nearest upscaling keeps hard edges
    bmp.set_size(4, 1).unwrap();
    assert_eq!(bmp.get_pixel_u8(1, 0).unwrap(), [0, 0, 0, 255]);
    assert_eq!(bmp.get_pixel_u8(2, 0).unwrap(), [255, 255, 255, 255]);
}

#[test]
fn test_named_resource() {
    let bundle = ResourceBundle::new().with("icon", Image::filled(3, 3, [1, 2, 3, 255]).unwrap());
    let mut bmp = BitmapImage::named(&bundle, "icon").unwrap();
    assert!(bmp.is_dirty());
    assert_eq!(bmp.image().unwrap().pixel(2, 2).unwrap(), [1, 2, 3, 255]);
    assert!(BitmapImage::named(&bundle, "missing").is_none());
}

#[test]
fn test_image_ext_roundtrip() {
    let img = Image::filled(200, 100, [10, 20, 30, 255]).unwrap();
    let fitted = img.aspect_scale_to_size(100, 100).unwrap();
    assert_eq!(fitted.dimensions(), (100, 50));
    let filled = img.fill_aspect_with_size(100, 100).unwrap();
    assert_eq!(filled.dimensions(), (100, 100));
    assert_eq!(filled.pixel(50, 50).unwrap(), [10, 20, 30, 255]);
}
