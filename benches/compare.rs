use std::any::Any;

use smallany::space::*;
use smallany::SmallAny;

fn main() {
    divan::main();
}

#[divan::bench]
fn smallany_small_item_small_space() {
    divan::black_box({
        let small: SmallAny<S1> = SmallAny::new(divan::black_box(true));
        small
    });
}

#[divan::bench]
fn smallany_small_item_large_space() {
    divan::black_box({
        let small: SmallAny<S64> = SmallAny::new(divan::black_box(true));
        small
    });
}

#[divan::bench]
fn smallany_large_item_small_space() {
    divan::black_box({
        let large: SmallAny<S1> = SmallAny::new(divan::black_box([0usize; 64]));
        large
    });
}

#[divan::bench]
fn smallany_large_item_large_space() {
    divan::black_box({
        let large: SmallAny<S64> = SmallAny::new(divan::black_box([0usize; 64]));
        large
    });
}

#[divan::bench]
fn smallany_clone_small_item(bencher: divan::Bencher) {
    let small: SmallAny = SmallAny::new(42u64);
    bencher.bench_local(|| divan::black_box(&small).clone());
}

#[divan::bench]
fn smallany_downcast(bencher: divan::Bencher) {
    let small: SmallAny = SmallAny::new(42u64);
    bencher.bench_local(|| divan::black_box(&small).downcast_ref::<u64>().copied());
}

#[divan::bench]
fn box_any_small_item() {
    divan::black_box({
        let small: Box<dyn Any> = Box::new(divan::black_box(true));
        small
    });
}

#[divan::bench]
fn box_any_large_item() {
    divan::black_box({
        let large: Box<dyn Any> = Box::new(divan::black_box([0usize; 64]));
        large
    });
}

#[divan::bench]
fn box_any_downcast(bencher: divan::Bencher) {
    let small: Box<dyn Any> = Box::new(42u64);
    bencher.bench_local(|| divan::black_box(&small).downcast_ref::<u64>().copied());
}
