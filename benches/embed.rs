//! 跳转页渲染与存储性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use embedlinker::services::{EmbedData, generate_embed_html, is_instagram_url_expired};
use embedlinker::storage::LinkStore;
use embedlinker::utils::RandomIdGenerator;
use std::hint::black_box;

// ============== generate_embed_html 基准测试 ==============

fn bench_generate_embed_html(c: &mut Criterion) {
    let mut group = c.benchmark_group("embed/generate_embed_html");

    let minimal = EmbedData::new("https://example.com/");
    group.bench_function("url_only", |b| {
        b.iter(|| generate_embed_html(black_box(&minimal)));
    });

    let video = EmbedData {
        title: Some("A clip".to_string()),
        description: Some("Watch <this> & that".to_string()),
        thumbnail: Some("https://example.com/t.jpg".to_string()),
        video: Some("https://example.com/v.mp4".to_string()),
        video_width: Some(720),
        video_height: Some(1280),
        video_type: Some("video/mp4".to_string()),
        ..EmbedData::new("https://example.com/reel/abc")
    };
    group.bench_function("full_video", |b| {
        b.iter(|| generate_embed_html(black_box(&video)));
    });

    for len in [100, 1000, 10000] {
        let long = EmbedData {
            title: Some("<\"'&>".repeat(len / 5)),
            ..EmbedData::new("https://example.com/")
        };
        group.bench_with_input(BenchmarkId::new("escaped_title", len), &long, |b, data| {
            b.iter(|| generate_embed_html(black_box(data)));
        });
    }

    group.finish();
}

// ============== is_instagram_url_expired 基准测试 ==============

fn bench_expiry_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("embed/is_instagram_url_expired");

    let cdn = "https://scontent.cdninstagram.com/v/t51.2885-15/clip.mp4?_nc_ht=x&oe=67000000&_nc_sid=1";
    group.bench_function("cdn_url", |b| {
        b.iter(|| is_instagram_url_expired(black_box(cdn)));
    });

    group.bench_function("other_host", |b| {
        b.iter(|| is_instagram_url_expired(black_box("https://example.com/?oe=67000000")));
    });

    group.bench_function("malformed", |b| {
        b.iter(|| is_instagram_url_expired(black_box("not a url")));
    });

    group.finish();
}

// ============== 内存存储基准测试 ==============

fn bench_in_memory_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("embed/store");

    group.bench_function("shorten_url", |b| {
        let mut store = LinkStore::in_memory(RandomIdGenerator::default());
        b.iter(|| store.shorten_url(black_box("https://example.com/"), None));
    });

    let mut store = LinkStore::in_memory(RandomIdGenerator::default());
    let ids: Vec<String> = (0..1000)
        .map(|i| store.shorten_url(&format!("https://example.com/{}", i), None))
        .collect();
    group.bench_function("resolve_url", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % ids.len();
            store.resolve_url(black_box(&ids[i]))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_generate_embed_html,
    bench_expiry_check,
    bench_in_memory_store,
);
criterion_main!(benches);
