//! FILENAME: core/dataset/src/generator.rs
//! PURPOSE: Deterministic synthetic data generator.
//! CONTEXT: Every foreign key is drawn from rows generated earlier in the same
//! run, so the output is referentially consistent by construction. The output
//! depends only on `seed` and `anchor`.

use chrono::{Duration, NaiveDateTime, Timelike, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::entities::{Customer, Dataset, Order, OrderItem, Product, Review};
use crate::timestamp::format_timestamp;
use crate::words::{EMAIL_DOMAINS, FIRST_NAMES, LAST_NAMES, PRODUCT_WORDS, REVIEW_WORDS};

/// Fixed set of product categories.
pub const CATEGORIES: [&str; 5] = ["electronics", "clothing", "home", "books", "toys"];

const CUSTOMER_HISTORY_DAYS: i64 = 3 * 365;
const ORDER_HISTORY_DAYS: i64 = 2 * 365;
const REVIEW_WORD_COUNT: usize = 12;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Sizes and seed for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    /// Each order gets between 1 and this many line items.
    pub max_items_per_order: usize,
    /// Each line item gets a quantity between 1 and this value.
    pub max_quantity: i64,
    pub reviews: usize,
    /// Latest possible timestamp; history windows count backwards from here.
    pub anchor: NaiveDateTime,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let now = Utc::now().naive_utc();
        GeneratorConfig {
            seed: 42,
            customers: 200,
            products: 100,
            orders: 1000,
            max_items_per_order: 5,
            max_quantity: 3,
            reviews: 400,
            anchor: now.with_nanosecond(0).unwrap_or(now),
        }
    }
}

impl GeneratorConfig {
    pub fn with_anchor(mut self, anchor: NaiveDateTime) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Generates all five entity sets.
pub fn generate(config: &GeneratorConfig) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let customers = generate_customers(&mut rng, config);
    let products = generate_products(&mut rng, config);

    if customers.is_empty() || products.is_empty() {
        log::warn!(
            "generator has {} customers and {} products; skipping orders and reviews",
            customers.len(),
            products.len()
        );
        return Dataset {
            customers,
            products,
            ..Dataset::default()
        };
    }

    let (orders, order_items) = generate_orders(&mut rng, config, &customers, &products);
    let reviews = generate_reviews(&mut rng, config, &customers, &products);

    log::debug!(
        "generated customers={} products={} orders={} order_items={} reviews={}",
        customers.len(),
        products.len(),
        orders.len(),
        order_items.len(),
        reviews.len()
    );

    Dataset {
        customers,
        products,
        orders,
        order_items,
        reviews,
    }
}

fn generate_customers(rng: &mut ChaCha8Rng, config: &GeneratorConfig) -> Vec<Customer> {
    (1..=config.customers)
        .map(|i| {
            let first = pick(rng, FIRST_NAMES);
            let last = pick(rng, LAST_NAMES);
            let domain = pick(rng, EMAIL_DOMAINS);
            Customer {
                customer_id: i as i64,
                name: format!("{} {}", first, last),
                email: format!("{}.{}{}@{}", first, last, i, domain).to_lowercase(),
                created_at: random_timestamp(rng, config.anchor, CUSTOMER_HISTORY_DAYS),
            }
        })
        .collect()
}

fn generate_products(rng: &mut ChaCha8Rng, config: &GeneratorConfig) -> Vec<Product> {
    (1..=config.products)
        .map(|i| {
            let name = format!(
                "{} {}",
                title_case(pick(rng, PRODUCT_WORDS)),
                title_case(pick(rng, PRODUCT_WORDS))
            );
            let category = pick(rng, &CATEGORIES).to_string();
            let price = round_cents(rng.gen_range(5.0..500.0));
            Product {
                product_id: i as i64,
                name,
                category,
                price,
                sku: format!("SKU{:05}", i),
            }
        })
        .collect()
}

fn generate_orders(
    rng: &mut ChaCha8Rng,
    config: &GeneratorConfig,
    customers: &[Customer],
    products: &[Product],
) -> (Vec<Order>, Vec<OrderItem>) {
    let mut orders = Vec::with_capacity(config.orders);
    let mut order_items = Vec::new();
    let max_items = config.max_items_per_order.max(1);
    let max_quantity = config.max_quantity.max(1);

    for order_id in 1..=config.orders as i64 {
        let customer_id = customers[rng.gen_range(0..customers.len())].customer_id;
        let order_date = random_timestamp(rng, config.anchor, ORDER_HISTORY_DAYS);
        let item_count = rng.gen_range(1..=max_items);
        let mut total = 0.0;

        for _ in 0..item_count {
            let product = &products[rng.gen_range(0..products.len())];
            let quantity = rng.gen_range(1..=max_quantity);
            total += quantity as f64 * product.price;
            order_items.push(OrderItem {
                order_item_id: order_items.len() as i64 + 1,
                order_id,
                product_id: product.product_id,
                quantity,
                unit_price: product.price,
            });
        }

        orders.push(Order {
            order_id,
            customer_id,
            order_date,
            total_amount: round_cents(total),
        });
    }

    (orders, order_items)
}

fn generate_reviews(
    rng: &mut ChaCha8Rng,
    config: &GeneratorConfig,
    customers: &[Customer],
    products: &[Product],
) -> Vec<Review> {
    (1..=config.reviews as i64)
        .map(|review_id| {
            let product_id = products[rng.gen_range(0..products.len())].product_id;
            let customer_id = customers[rng.gen_range(0..customers.len())].customer_id;
            Review {
                review_id,
                product_id,
                customer_id,
                rating: rng.gen_range(1..=5),
                review_text: random_sentence(rng, REVIEW_WORD_COUNT),
                review_date: random_timestamp(rng, config.anchor, ORDER_HISTORY_DAYS),
            }
        })
        .collect()
}

// ============================================================================
// HELPERS
// ============================================================================

fn pick<'a>(rng: &mut ChaCha8Rng, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn random_timestamp(rng: &mut ChaCha8Rng, anchor: NaiveDateTime, history_days: i64) -> String {
    let offset = rng.gen_range(0..=history_days * 86_400);
    format_timestamp(&(anchor - Duration::seconds(offset)))
}

fn random_sentence(rng: &mut ChaCha8Rng, word_count: usize) -> String {
    let words: Vec<&str> = (0..word_count).map(|_| pick(rng, REVIEW_WORDS)).collect();
    let mut sentence = title_case(&words.join(" "));
    sentence.push('.');
    sentence
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
