use crate::domain::product::{Category, CategoryId, Product, ProductId};

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    original_price: Option<f64>,
    category: CategoryId,
    subcategory: &'static str,
    tags: &'static [&'static str],
    rating: f64,
    review_count: u32,
    in_stock: bool,
    bundle_eligible: &'static [&'static str],
    popularity_score: f64,
}

struct CategorySeed {
    id: CategoryId,
    name: &'static str,
    description: &'static str,
    related: &'static [CategoryId],
}

const CATEGORY_SEEDS: &[CategorySeed] = &[
    CategorySeed {
        id: CategoryId::Electronics,
        name: "Electronics",
        description: "Gadgets, audio, and smart devices",
        related: &[CategoryId::Home],
    },
    CategorySeed {
        id: CategoryId::Clothing,
        name: "Clothing",
        description: "Apparel, footwear, and accessories",
        related: &[CategoryId::Sports, CategoryId::Beauty],
    },
    CategorySeed {
        id: CategoryId::Home,
        name: "Home & Living",
        description: "Furniture, decor, and kitchen essentials",
        related: &[CategoryId::Electronics],
    },
    CategorySeed {
        id: CategoryId::Sports,
        name: "Sports & Fitness",
        description: "Equipment, gear, and activewear",
        related: &[CategoryId::Clothing],
    },
    CategorySeed {
        id: CategoryId::Books,
        name: "Books",
        description: "Fiction, non-fiction, and educational",
        related: &[],
    },
    CategorySeed {
        id: CategoryId::Beauty,
        name: "Beauty & Care",
        description: "Skincare, haircare, and wellness",
        related: &[CategoryId::Clothing],
    },
];

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "elec-001",
        name: "Aurora Wireless Headphones",
        description: "Over-ear headphones with adaptive noise cancelling and 30-hour battery life.",
        price: 24_999.0,
        original_price: Some(29_999.0),
        category: CategoryId::Electronics,
        subcategory: "headphones",
        tags: &["wireless", "noise-cancelling", "bluetooth", "premium"],
        rating: 4.7,
        review_count: 2_841,
        in_stock: true,
        bundle_eligible: &["elec-004", "elec-006"],
        popularity_score: 92.0,
    },
    ProductSeed {
        id: "elec-002",
        name: "Pulse Sport Earbuds",
        description: "Sweat-resistant true wireless earbuds with secure-fit wings.",
        price: 7_999.0,
        original_price: None,
        category: CategoryId::Electronics,
        subcategory: "headphones",
        tags: &["wireless", "bluetooth", "sport", "compact"],
        rating: 4.3,
        review_count: 1_520,
        in_stock: true,
        bundle_eligible: &["spo-001"],
        popularity_score: 78.0,
    },
    ProductSeed {
        id: "elec-003",
        name: "Nimbus Smart Speaker",
        description: "Room-filling smart speaker with a built-in voice assistant.",
        price: 12_999.0,
        original_price: None,
        category: CategoryId::Electronics,
        subcategory: "speakers",
        tags: &["smart-home", "bluetooth", "voice-assistant"],
        rating: 4.5,
        review_count: 980,
        in_stock: true,
        bundle_eligible: &["home-003"],
        popularity_score: 74.0,
    },
    ProductSeed {
        id: "elec-004",
        name: "Voyager Headphone Case",
        description: "Hard-shell travel case that fits most over-ear headphones.",
        price: 2_499.0,
        original_price: None,
        category: CategoryId::Electronics,
        subcategory: "accessories",
        tags: &["travel", "protective", "compact"],
        rating: 4.1,
        review_count: 412,
        in_stock: true,
        bundle_eligible: &[],
        popularity_score: 55.0,
    },
    ProductSeed {
        id: "elec-005",
        name: "Horizon 14\" Laptop",
        description: "Thin and light laptop with an all-day battery and a bright 14-inch display.",
        price: 129_999.0,
        original_price: Some(139_999.0),
        category: CategoryId::Electronics,
        subcategory: "laptops",
        tags: &["portable", "productivity", "premium"],
        rating: 4.6,
        review_count: 1_204,
        in_stock: true,
        bundle_eligible: &["elec-006", "elec-007"],
        popularity_score: 88.0,
    },
    ProductSeed {
        id: "elec-006",
        name: "Flux USB-C Charging Hub",
        description: "Six-port USB-C hub with 100W pass-through charging.",
        price: 4_999.0,
        original_price: None,
        category: CategoryId::Electronics,
        subcategory: "accessories",
        tags: &["usb-c", "compact", "travel"],
        rating: 4.2,
        review_count: 734,
        in_stock: true,
        bundle_eligible: &[],
        popularity_score: 61.0,
    },
    ProductSeed {
        id: "elec-007",
        name: "Orbit Wireless Mouse",
        description: "Ergonomic wireless mouse with silent clicks and multi-device pairing.",
        price: 3_999.0,
        original_price: None,
        category: CategoryId::Electronics,
        subcategory: "accessories",
        tags: &["wireless", "ergonomic", "productivity"],
        rating: 4.5,
        review_count: 2_210,
        in_stock: true,
        bundle_eligible: &["elec-008"],
        popularity_score: 80.0,
    },
    ProductSeed {
        id: "elec-008",
        name: "Keystone Mechanical Keyboard",
        description: "Hot-swappable mechanical keyboard with per-key lighting.",
        price: 10_999.0,
        original_price: None,
        category: CategoryId::Electronics,
        subcategory: "accessories",
        tags: &["mechanical", "productivity", "rgb"],
        rating: 4.6,
        review_count: 1_650,
        in_stock: true,
        bundle_eligible: &["elec-007"],
        popularity_score: 83.0,
    },
    ProductSeed {
        id: "elec-009",
        name: "Chronos Smart Watch",
        description: "Fitness-first smart watch with heart-rate and sleep tracking.",
        price: 29_999.0,
        original_price: None,
        category: CategoryId::Electronics,
        subcategory: "wearables",
        tags: &["fitness", "smart", "bluetooth"],
        rating: 4.4,
        review_count: 1_890,
        in_stock: false,
        bundle_eligible: &[],
        popularity_score: 86.0,
    },
    ProductSeed {
        id: "clo-001",
        name: "Everyday Cotton Tee",
        description: "Soft organic cotton t-shirt with a relaxed fit.",
        price: 2_499.0,
        original_price: None,
        category: CategoryId::Clothing,
        subcategory: "tops",
        tags: &["cotton", "casual", "sustainable"],
        rating: 4.3,
        review_count: 3_120,
        in_stock: true,
        bundle_eligible: &["clo-003"],
        popularity_score: 75.0,
    },
    ProductSeed {
        id: "clo-002",
        name: "Stride Running Shoes",
        description: "Lightweight running shoes with responsive foam cushioning.",
        price: 11_999.0,
        original_price: Some(13_999.0),
        category: CategoryId::Clothing,
        subcategory: "footwear",
        tags: &["running", "lightweight", "sport"],
        rating: 4.6,
        review_count: 2_045,
        in_stock: true,
        bundle_eligible: &["spo-003"],
        popularity_score: 89.0,
    },
    ProductSeed {
        id: "clo-003",
        name: "Heritage Denim Jacket",
        description: "Classic trucker jacket in rigid selvedge denim.",
        price: 8_999.0,
        original_price: None,
        category: CategoryId::Clothing,
        subcategory: "outerwear",
        tags: &["denim", "casual", "classic"],
        rating: 4.4,
        review_count: 860,
        in_stock: true,
        bundle_eligible: &["clo-001"],
        popularity_score: 68.0,
    },
    ProductSeed {
        id: "clo-004",
        name: "Trail Hiking Boots",
        description: "Waterproof leather boots with a grippy lugged outsole.",
        price: 15_999.0,
        original_price: None,
        category: CategoryId::Clothing,
        subcategory: "footwear",
        tags: &["hiking", "waterproof", "durable"],
        rating: 4.5,
        review_count: 990,
        in_stock: true,
        bundle_eligible: &["spo-004"],
        popularity_score: 72.0,
    },
    ProductSeed {
        id: "home-001",
        name: "Lumen Desk Lamp",
        description: "Dimmable LED desk lamp with app and voice control.",
        price: 5_999.0,
        original_price: None,
        category: CategoryId::Home,
        subcategory: "lighting",
        tags: &["smart-home", "minimalist", "energy-efficient"],
        rating: 4.4,
        review_count: 640,
        in_stock: true,
        bundle_eligible: &["home-002"],
        popularity_score: 66.0,
    },
    ProductSeed {
        id: "home-002",
        name: "Arc Floor Lamp",
        description: "Sweeping arc floor lamp with a linen shade.",
        price: 8_999.0,
        original_price: None,
        category: CategoryId::Home,
        subcategory: "lighting",
        tags: &["minimalist", "modern", "energy-efficient"],
        rating: 4.2,
        review_count: 410,
        in_stock: true,
        bundle_eligible: &["home-001"],
        popularity_score: 58.0,
    },
    ProductSeed {
        id: "home-003",
        name: "Brew Master Coffee Maker",
        description: "Programmable 12-cup coffee maker with a thermal carafe.",
        price: 14_999.0,
        original_price: Some(17_999.0),
        category: CategoryId::Home,
        subcategory: "kitchen",
        tags: &["kitchen", "programmable", "stainless"],
        rating: 4.7,
        review_count: 1_780,
        in_stock: true,
        bundle_eligible: &["home-004"],
        popularity_score: 84.0,
    },
    ProductSeed {
        id: "home-004",
        name: "Ceramic Pour-Over Set",
        description: "Hand-thrown ceramic dripper with a matching carafe.",
        price: 3_499.0,
        original_price: None,
        category: CategoryId::Home,
        subcategory: "kitchen",
        tags: &["kitchen", "minimalist", "handmade"],
        rating: 4.5,
        review_count: 530,
        in_stock: true,
        bundle_eligible: &[],
        popularity_score: 60.0,
    },
    ProductSeed {
        id: "spo-001",
        name: "Flow Yoga Mat",
        description: "Non-slip natural rubber yoga mat, 5mm thick.",
        price: 4_999.0,
        original_price: None,
        category: CategoryId::Sports,
        subcategory: "yoga",
        tags: &["yoga", "eco-friendly", "non-slip"],
        rating: 4.6,
        review_count: 2_310,
        in_stock: true,
        bundle_eligible: &["spo-002"],
        popularity_score: 81.0,
    },
    ProductSeed {
        id: "spo-002",
        name: "Balance Yoga Blocks",
        description: "Pair of cork yoga blocks for support and alignment.",
        price: 1_999.0,
        original_price: None,
        category: CategoryId::Sports,
        subcategory: "yoga",
        tags: &["yoga", "eco-friendly", "lightweight"],
        rating: 4.3,
        review_count: 870,
        in_stock: true,
        bundle_eligible: &["spo-001"],
        popularity_score: 57.0,
    },
    ProductSeed {
        id: "spo-003",
        name: "Hydra Insulated Bottle",
        description: "Double-wall stainless bottle that keeps drinks cold for 24 hours.",
        price: 2_999.0,
        original_price: None,
        category: CategoryId::Sports,
        subcategory: "accessories",
        tags: &["hydration", "sport", "stainless"],
        rating: 4.7,
        review_count: 4_120,
        in_stock: true,
        bundle_eligible: &[],
        popularity_score: 90.0,
    },
    ProductSeed {
        id: "spo-004",
        name: "Summit Trekking Poles",
        description: "Collapsible carbon trekking poles with cork grips.",
        price: 7_999.0,
        original_price: None,
        category: CategoryId::Sports,
        subcategory: "hiking",
        tags: &["hiking", "lightweight", "durable"],
        rating: 4.4,
        review_count: 380,
        in_stock: true,
        bundle_eligible: &[],
        popularity_score: 52.0,
    },
    ProductSeed {
        id: "book-001",
        name: "The Quiet Algorithm",
        description: "A bestselling techno-thriller about a search engine that starts keeping secrets.",
        price: 1_899.0,
        original_price: None,
        category: CategoryId::Books,
        subcategory: "fiction",
        tags: &["bestseller", "thriller", "paperback"],
        rating: 4.5,
        review_count: 5_240,
        in_stock: true,
        bundle_eligible: &["book-002"],
        popularity_score: 87.0,
    },
    ProductSeed {
        id: "book-002",
        name: "Designing Calm Spaces",
        description: "An illustrated guide to minimalist interiors.",
        price: 3_499.0,
        original_price: None,
        category: CategoryId::Books,
        subcategory: "non-fiction",
        tags: &["minimalist", "design", "hardcover"],
        rating: 4.3,
        review_count: 720,
        in_stock: true,
        bundle_eligible: &[],
        popularity_score: 62.0,
    },
    ProductSeed {
        id: "bea-001",
        name: "Glow Vitamin C Serum",
        description: "Brightening vitamin C serum with hyaluronic acid.",
        price: 3_899.0,
        original_price: Some(4_599.0),
        category: CategoryId::Beauty,
        subcategory: "skincare",
        tags: &["skincare", "vegan", "brightening"],
        rating: 4.6,
        review_count: 2_980,
        in_stock: true,
        bundle_eligible: &["bea-002"],
        popularity_score: 85.0,
    },
    ProductSeed {
        id: "bea-002",
        name: "Hydrating Night Cream",
        description: "Rich overnight moisturiser with ceramides.",
        price: 4_499.0,
        original_price: None,
        category: CategoryId::Beauty,
        subcategory: "skincare",
        tags: &["skincare", "vegan", "hydrating"],
        rating: 4.4,
        review_count: 1_340,
        in_stock: true,
        bundle_eligible: &["bea-001"],
        popularity_score: 70.0,
    },
];

pub(super) fn categories() -> Vec<Category> {
    CATEGORY_SEEDS
        .iter()
        .map(|seed| Category {
            id: seed.id,
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            related_categories: seed.related.to_vec(),
        })
        .collect()
}

pub(super) fn products() -> Vec<Product> {
    PRODUCT_SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            price: seed.price,
            original_price: seed.original_price,
            category: seed.category,
            subcategory: seed.subcategory.to_owned(),
            tags: seed.tags.iter().map(|tag| (*tag).to_owned()).collect(),
            rating: seed.rating,
            review_count: seed.review_count,
            image_url: format!("/images/products/{}.jpg", seed.id),
            in_stock: seed.in_stock,
            bundle_eligible: seed.bundle_eligible.iter().map(|id| ProductId::new(*id)).collect(),
            popularity_score: seed.popularity_score,
        })
        .collect()
}
