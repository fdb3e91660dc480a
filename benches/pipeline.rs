use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use eventrec::{
    sample, CategoryVocabulary, DateWindow, FeatureEncoder, Item, LogisticClassifier, Pipeline,
    Recommender, RecommenderConfig, Trainer, UserId, UserProfile,
};

fn synthetic_catalog(len: usize, categories: usize) -> Vec<Item> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..len)
        .map(|i| {
            let offset = i64::try_from(i % 365).unwrap();
            Item::new(
                format!("event-{i}"),
                format!("category-{}", i % categories),
                start + Duration::days(offset),
            )
        })
        .collect()
}

fn bench_sample_pipeline(c: &mut Criterion) {
    let items = sample::catalog();
    let user = sample::user(&items);
    let pipeline = Pipeline::new(RecommenderConfig {
        seed: Some(1),
        ..RecommenderConfig::default()
    });

    c.bench_function("pipeline/sample_1000_epochs", |b| {
        b.iter(|| black_box(pipeline.run(&user, &items).unwrap()));
    });
}

fn bench_train(c: &mut Criterion) {
    let items = synthetic_catalog(512, 32);
    let mut user = UserProfile::new(UserId::new(1));
    for item in items.iter().step_by(16) {
        user.add_search(item.clone());
    }
    let encoder = FeatureEncoder::new(DateWindow::calendar_year(2024).unwrap());

    let mut group = c.benchmark_group("train");
    group.throughput(Throughput::Elements(100));
    group.bench_function("512_items_100_epochs", |b| {
        b.iter(|| {
            let mut vocab = CategoryVocabulary::new();
            let mut clf = LogisticClassifier::with_seed(0.01, 7).unwrap();
            Trainer::new(100)
                .train(&mut clf, &user, &items, &encoder, &mut vocab)
                .unwrap()
        });
    });
    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let items = synthetic_catalog(4096, 64);
    let encoder = FeatureEncoder::new(DateWindow::calendar_year(2024).unwrap());
    let mut vocab = CategoryVocabulary::new();
    vocab.observe(&items);
    let mut clf = LogisticClassifier::with_seed(0.01, 3).unwrap();
    clf.initialize(FeatureEncoder::feature_len(&vocab));
    let recommender = Recommender::new(10);

    let mut group = c.benchmark_group("recommend");
    group.throughput(Throughput::Elements(items.len() as u64));
    group.bench_function("4096_items_top_10", |b| {
        b.iter(|| {
            black_box(
                recommender
                    .recommend(&clf, &items, &encoder, &vocab)
                    .unwrap(),
            )
        });
    });
    group.finish();
}

criterion_group!(benches, bench_sample_pipeline, bench_train, bench_recommend);
criterion_main!(benches);
