use proptest::prelude::*;
use turbo_catalog::filter::{
    self, AttributeFilter, DateRange, FilterState, PriceBounds, PriceSelection, ProductFlags,
    QueryString, StockAvailability,
};
use turbo_catalog::pagination::{visible_pages, PageSlot};

/// Includes zero and negative amounts, which mean "unbounded".
fn price_amount() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        (-100_000i32..0).prop_map(|cents| f64::from(cents) / 100.0),
        (1u32..10_000_000).prop_map(|cents| f64::from(cents) / 100.0),
    ]
}

fn price_selection() -> impl Strategy<Value = PriceSelection> {
    prop_oneof![
        Just(PriceSelection::Any),
        (proptest::option::of(price_amount()), proptest::option::of(price_amount())).prop_map(
            |(gte, lte)| {
                let mut filters = FilterState::new();
                filters.set_price(PriceBounds::new(gte, lte));
                filters.price
            }
        ),
        "[0-9]{1,4}-[0-9]{1,4}|under-[0-9]{2,3}".prop_map(|id| PriceSelection::Preset { id }),
    ]
}

prop_compose! {
    fn filter_state()(
        search in proptest::option::of("[a-zA-Z0-9][a-zA-Z0-9 &=+%/?]{0,15}"),
        categories in proptest::collection::vec("[a-zA-Z0-9=-]{1,10}", 0..4),
        collections in proptest::collection::vec("[a-z-]{1,8}", 0..2),
        attributes in proptest::collection::vec(
            ("[a-z]{1,6}", proptest::collection::vec("[a-z0-9]{1,5}", 0..3)),
            0..3,
        ),
        price in price_selection(),
        stock in proptest::option::of(prop_oneof![
            Just(StockAvailability::InStock),
            Just(StockAvailability::OutOfStock),
        ]),
        sort_by in prop_oneof![
            Just("NAME"), Just("NAME_DESC"), Just("PRICE"), Just("PRICE_DESC"),
            Just("DATE"), Just("DATE_ASC"), Just("-PRICE"),
        ],
        gift_card in proptest::option::of(any::<bool>()),
        is_available in proptest::option::of(any::<bool>()),
        updated_gte in proptest::option::of("2024-0[1-9]-[12][0-9]"),
    ) -> FilterState {
        FilterState {
            search,
            categories,
            collections,
            attributes: attributes
                .into_iter()
                .filter_map(|(slug, values)| AttributeFilter::new(slug, values))
                .collect(),
            price,
            stock_availability: stock,
            sort_by: sort_by.to_string(),
            flags: ProductFlags {
                gift_card,
                is_available,
                ..ProductFlags::default()
            },
            updated_at: DateRange { gte: updated_gte, lte: None },
            ..FilterState::default()
        }
    }
}

proptest! {
    #[test]
    fn url_round_trip(filters in filter_state()) {
        let url = filter::encode(&filters).to_string();
        prop_assert_eq!(filter::decode(&QueryString::parse(&url)), filters);
    }

    #[test]
    fn encode_never_carries_navigation(filters in filter_state()) {
        let query = filter::encode(&filters);
        prop_assert!(!query.contains("cursor"));
        prop_assert!(!query.contains("page"));
        prop_assert!(!query.contains("loadMore"));
    }

    #[test]
    fn price_sources_are_exclusive(
        filters in filter_state(),
        min in price_amount(),
        preset in "[0-9]{1,4}-[0-9]{1,4}",
    ) {
        let mut custom = filters.clone();
        custom.set_price(PriceBounds::new(Some(min), None));
        prop_assert_eq!(custom.price_range(), None);
        let encoded = filter::encode(&custom);
        prop_assert!(!encoded.contains("priceRange"));

        let mut bucket = filters;
        bucket.set_price_range(preset.clone());
        prop_assert_eq!(bucket.price_range(), Some(preset.as_str()));
        let encoded = filter::encode(&bucket);
        prop_assert!(!encoded.contains("priceMin"));
        prop_assert!(!encoded.contains("priceMax"));
    }

    #[test]
    fn decode_is_total(raw in "\\PC{0,64}") {
        let query = QueryString::parse(&raw);
        let filters = filter::decode(&query);
        prop_assert!(!filters.sort_by.is_empty());
        let nav = filter::decode_navigation(&query);
        prop_assert!(nav.page >= 1);
    }

    #[test]
    fn pager_shape(total in 2u32..200, current in 1u32..200, max in 5usize..12) {
        let current = current.min(total);
        let slots = visible_pages(current, total, max);
        let pages: Vec<u32> = slots
            .iter()
            .filter_map(|slot| match slot {
                PageSlot::Page(p) => Some(*p),
                PageSlot::Ellipsis => None,
            })
            .collect();

        prop_assert_eq!(pages.first(), Some(&1));
        prop_assert_eq!(pages.last(), Some(&total));
        prop_assert!(pages.contains(&current));
        prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(pages.len() <= max + 1);
        prop_assert!(slots.windows(2).all(|w| !(w[0] == PageSlot::Ellipsis && w[1] == PageSlot::Ellipsis)));
    }
}
