#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for PNG previews of frames and animations.

use std::error::Error;
use std::fs::File;

use keypad_panel::animation::library;
use keypad_panel::led_panel::{Frame, colors};
use keypad_panel::to_png::{write_animation_apng, write_frame_png};

#[test]
fn frame_png_has_expected_size_and_center_color() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("previews").join("center.png");
    let frame = Frame::from_mask([0, 0, 0b00100, 0, 0], colors::RED);
    write_frame_png(&frame, &path, 200)?;

    let decoder = png::Decoder::new(File::open(&path)?);
    let mut reader = decoder.read_info()?;
    let mut pixels = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels)?;
    assert_eq!((info.width, info.height), (200, 200));

    let center = ((100 * 200 + 100) * 3) as usize;
    assert_eq!(pixels[center..center + 3], [255, 0, 0]);
    let corner_cell = ((20 * 200 + 20) * 3) as usize;
    assert_ne!(pixels[corner_cell..corner_cell + 3], [255, 0, 0]);
    Ok(())
}

#[test]
fn animation_apng_has_one_image_per_flush() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    for animation in library::ALL {
        let path = dir.path().join(format!("{}.png", animation.name));
        write_animation_apng(animation, &path, 100)?;

        let decoder = png::Decoder::new(File::open(&path)?);
        let reader = decoder.read_info()?;
        let control = reader
            .info()
            .animation_control
            .ok_or("missing animation control chunk")?;
        assert_eq!(control.num_frames as usize, animation.flush_count(), "{}", animation.name);
        assert_eq!(control.num_plays, 0);
    }
    Ok(())
}
