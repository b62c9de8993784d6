//! Performance benchmarks for post mapping
//!
//! Measures raw record to view model mapping for timeline-sized batches.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use feedline::models::{RawEmbed, RawImage, RawPost};
use feedline::render::{proxy_image_url, render_posts};

/// Generate raw posts, every third one carrying two images
fn generate_posts(count: usize) -> Vec<RawPost> {
    (0..count)
        .map(|i| {
            let mut post = RawPost::new(
                format!("at://did:plc:bench/app.bsky.feed.post/{}", i),
                format!("user{}.bsky.social", i % 17),
                format!("Post number {} with a #tag and a mention of @someone.test", i),
            );
            post.record.created_at = Some("2024-05-01T12:00:00.000Z".to_string());
            post.like_count = Some(i as u32);
            if i % 3 == 0 {
                post.embed = Some(RawEmbed {
                    kind: Some("app.bsky.embed.images#view".to_string()),
                    images: Some(
                        (0..2)
                            .map(|n| RawImage {
                                thumb: Some(format!("https://cdn.bsky.app/img/thumb/{}-{}@jpeg", i, n)),
                                fullsize: Some(format!("https://cdn.bsky.app/img/full/{}-{}@jpeg?s=1", i, n)),
                                alt: None,
                            })
                            .collect(),
                    ),
                    media: None,
                });
            }
            post
        })
        .collect()
}

fn bench_render_posts(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_posts");

    for size in [10, 50, 100, 500].iter() {
        let posts = generate_posts(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_posts", size)),
            &posts,
            |b, posts| {
                b.iter(|| black_box(render_posts(black_box(posts))));
            },
        );
    }

    group.finish();
}

fn bench_proxy_image_url(c: &mut Criterion) {
    let url = "https://cdn.bsky.app/img/feed_fullsize/plain/did:plc:abc123/bafkreigh2akiscaild@jpeg?width=1000";
    c.bench_function("proxy_image_url", |b| {
        b.iter(|| black_box(proxy_image_url(black_box(url))));
    });
}

criterion_group!(benches, bench_render_posts, bench_proxy_image_url);
criterion_main!(benches);
