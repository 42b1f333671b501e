//! Behavioural properties of the waterfall layout engine

use waterfall::layout::{
    arrange, column_count, initialize_columns, place_image, scaled_height, shortest_column,
};
use waterfall::{Error, ImageDescriptor};

fn img(id: &str, w: u32, h: u32) -> ImageDescriptor {
    ImageDescriptor::new(id, format!("https://img.test/{}.jpg", id), w, h)
}

/// Deterministic spread of shapes: portraits, landscapes and squares.
fn sample_images(n: usize) -> Vec<ImageDescriptor> {
    (0..n)
        .map(|i| {
            let w = 100 + (i as u32 * 37) % 400;
            let h = 80 + (i as u32 * 53) % 500;
            img(&format!("img{}", i), w, h)
        })
        .collect()
}

#[test]
fn column_count_stays_in_range() {
    let mut width = 0.0;
    while width < 5000.0 {
        let n = column_count(width, 200.0, 8);
        assert!((1..=8).contains(&n), "width {} gave {}", width, n);
        width += 17.5;
    }
}

#[test]
fn column_count_reference_values() {
    assert_eq!(column_count(800.0, 200.0, 8), 4);
    assert_eq!(column_count(150.0, 200.0, 8), 1);
    assert_eq!(column_count(10000.0, 200.0, 8), 8);
}

#[test]
fn every_image_is_placed_exactly_once() {
    let images = sample_images(57);
    let columns = arrange(images.clone(), 5, 180.0).unwrap();
    assert_eq!(columns.len(), 5);

    let mut ids: Vec<&str> = columns
        .iter()
        .flat_map(|c| c.images.iter().map(|i| i.id.as_str()))
        .collect();
    assert_eq!(ids.len(), images.len());
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), images.len());
}

#[test]
fn input_order_is_preserved_within_columns() {
    let images = sample_images(40);
    let position = |id: &str| images.iter().position(|i| i.id == id).unwrap();
    let columns = arrange(images.clone(), 4, 200.0).unwrap();
    for column in &columns {
        let positions: Vec<usize> = column.images.iter().map(|i| position(&i.id)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn column_heights_are_sums_of_scaled_heights() {
    let columns = arrange(sample_images(30), 3, 150.0).unwrap();
    for column in &columns {
        let expected: f64 = column.images.iter().map(|i| scaled_height(i, 150.0)).sum();
        assert!((column.height - expected).abs() < 1e-9);
    }
}

#[test]
fn first_image_goes_to_first_empty_column() {
    let mut columns = initialize_columns(3);
    let idx = place_image(&mut columns, img("only", 640, 480), 200.0).unwrap();
    assert_eq!(idx, 0);
    assert_eq!(columns[0].len(), 1);
    assert!(columns[1].is_empty() && columns[2].is_empty());
}

#[test]
fn shortest_column_is_stable_without_mutation() {
    let columns = arrange(sample_images(9), 4, 100.0).unwrap();
    assert_eq!(shortest_column(&columns), shortest_column(&columns));
}

#[test]
fn three_image_two_column_scenario() {
    let columns = arrange(
        vec![img("1", 100, 100), img("2", 100, 50), img("3", 100, 200)],
        2,
        100.0,
    )
    .unwrap();

    assert_eq!(columns[0].images, vec![img("1", 100, 100)]);
    assert_eq!(columns[0].height, 100.0);
    assert_eq!(columns[1].images, vec![img("2", 100, 50), img("3", 100, 200)]);
    assert_eq!(columns[1].height, 250.0);
}

#[test]
fn single_column_stacks_everything_in_order() {
    let images = sample_images(12);
    let total: f64 = images.iter().map(|i| scaled_height(i, 300.0)).sum();
    let columns = arrange(images.clone(), 1, 300.0).unwrap();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].images, images);
    assert!((columns[0].height - total).abs() < 1e-9);
}

#[test]
fn zero_height_image_is_rejected() {
    let images = vec![img("ok", 10, 10), img("flat", 10, 0)];
    match arrange(images, 2, 100.0) {
        Err(Error::InvalidImage { id, width, height }) => {
            assert_eq!(id, "flat");
            assert_eq!((width, height), (10, 0));
        }
        other => panic!("expected InvalidImage, got {:?}", other),
    }
}

#[test]
fn greedy_placement_keeps_columns_within_one_image() {
    // After each greedy placement the tallest column exceeds the shortest by
    // at most the tallest single scaled image.
    let images = sample_images(100);
    let max_item = images
        .iter()
        .map(|i| scaled_height(i, 120.0))
        .fold(0.0, f64::max);
    let columns = arrange(images, 6, 120.0).unwrap();
    let tallest = columns.iter().map(|c| c.height).fold(0.0, f64::max);
    let shortest = columns.iter().map(|c| c.height).fold(f64::INFINITY, f64::min);
    assert!(tallest - shortest <= max_item + 1e-9);
}
