use chrono::{Duration, NaiveDate};
use eventrec::{
    CategoryVocabulary, ClassifierSnapshot, DateWindow, FeatureEncoder, Item, ItemId,
    LogisticClassifier, Recommender,
};
use proptest::prelude::*;

const CATEGORIES: [&str; 6] = ["Community", "music", "SPORTS", "Art", "technology", "Food"];

fn encoder() -> FeatureEncoder {
    FeatureEncoder::new(DateWindow::calendar_year(2024).unwrap())
}

fn item_strategy() -> impl Strategy<Value = Item> {
    (0..CATEGORIES.len(), -400i64..800).prop_map(|(cat, offset)| {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset);
        Item::new(format!("event-{cat}-{offset}"), CATEGORIES[cat], date)
    })
}

proptest! {
    #[test]
    fn encoding_is_deterministic(items in prop::collection::vec(item_strategy(), 1..20)) {
        let enc = encoder();
        let mut vocab = CategoryVocabulary::new();
        vocab.observe(&items);
        for item in &items {
            let mut a = vocab.clone();
            let mut b = vocab.clone();
            prop_assert_eq!(enc.encode(item, &mut a), enc.encode(item, &mut b));
            prop_assert_eq!(enc.encode_frozen(item, &vocab).unwrap(), enc.encode(item, &mut a));
        }
    }

    #[test]
    fn vocabulary_is_monotonic(items in prop::collection::vec(item_strategy(), 0..40)) {
        let enc = encoder();
        let mut vocab = CategoryVocabulary::new();
        let mut seen: Vec<(String, usize)> = Vec::new();
        for item in &items {
            let before = vocab.len();
            let v = enc.encode(item, &mut vocab);
            prop_assert!(vocab.len() >= before);
            prop_assert!(vocab.len() <= before + 1);
            prop_assert_eq!(v.category_part().len(), vocab.len());
            for (label, idx) in &seen {
                prop_assert_eq!(vocab.index_of(label), Some(*idx));
            }
            let idx = vocab.index_of(item.category()).unwrap();
            seen.push((item.category().to_string(), idx));
        }
    }

    #[test]
    fn category_block_is_one_hot(items in prop::collection::vec(item_strategy(), 1..30)) {
        let enc = encoder();
        let mut vocab = CategoryVocabulary::new();
        for item in &items {
            let v = enc.encode(item, &mut vocab);
            let ones = v.category_part().iter().filter(|&&x| x == 1.0).count();
            let zeros = v.category_part().iter().filter(|&&x| x == 0.0).count();
            prop_assert_eq!(ones, 1);
            prop_assert_eq!(ones + zeros, v.category_part().len());
            prop_assert_eq!(v.date_component(), enc.window().normalize(item.date()));
        }
    }

    #[test]
    fn predict_stays_in_open_unit_interval(
        weights in prop::collection::vec(-2.0f64..2.0, 1..12),
        bias in -2.0f64..2.0,
        seed in any::<u64>(),
    ) {
        let clf = LogisticClassifier::from_snapshot(ClassifierSnapshot {
            weights: weights.clone(),
            bias,
            learning_rate: 0.01,
        }).unwrap();
        let features: Vec<f64> = (0..weights.len())
            .map(|i| f64::from(u32::try_from((seed >> (i % 64)) & 1).unwrap()))
            .collect();
        let p = clf.predict(&features).unwrap();
        prop_assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn update_step_moves_prediction_toward_target(
        seed in any::<u64>(),
        width in 1usize..10,
        hot in 0usize..10,
        date in 0.0f64..1.0,
        positive in any::<bool>(),
    ) {
        let mut clf = LogisticClassifier::with_seed(0.05, seed).unwrap();
        clf.initialize(width + 1);
        let mut sample = vec![0.0; width];
        sample[hot % width] = 1.0;
        sample.push(date);
        let target = if positive { 1.0 } else { 0.0 };

        let mut last = (target - clf.predict(&sample).unwrap()).abs();
        for _ in 0..20 {
            clf.update_step(&sample, target).unwrap();
            let now = (target - clf.predict(&sample).unwrap()).abs();
            prop_assert!(now <= last);
            last = now;
        }
    }

    #[test]
    fn ranking_is_sorted_stable_and_truncated(
        items in prop::collection::vec(item_strategy(), 0..25),
        top_n in 0usize..30,
        seed in any::<u64>(),
    ) {
        let enc = encoder();
        let mut vocab = CategoryVocabulary::new();
        vocab.observe(&items);
        let mut clf = LogisticClassifier::with_seed(0.01, seed).unwrap();
        clf.initialize(FeatureEncoder::feature_len(&vocab));

        let recs = Recommender::new(top_n).recommend(&clf, &items, &enc, &vocab).unwrap();
        prop_assert_eq!(recs.len(), top_n.min(items.len()));

        let position = |id: ItemId| items.iter().position(|i| i.id() == id).unwrap();
        for pair in recs.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(position(pair[0].item.id()) < position(pair[1].item.id()));
            }
        }
    }
}

#[test]
fn window_boundaries_encode_to_zero_and_one() {
    let enc = encoder();
    let mut vocab = CategoryVocabulary::new();
    let start = Item::new("start", "Art", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    let end = Item::new("end", "Art", NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    assert_eq!(enc.encode(&start, &mut vocab).date_component(), 0.0);
    assert_eq!(enc.encode(&end, &mut vocab).date_component(), 1.0);
}
