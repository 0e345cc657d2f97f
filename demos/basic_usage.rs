// ============================================================================
// Basic Usage Example
// ============================================================================

use exact_decimal::prelude::*;
use tracing::Level;

fn main() {
    // Rejected inputs below are logged at debug level
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    println!("=== Exact Decimal Example ===\n");

    // Floats become the shortest decimal that reads back identically
    println!("Float conversion:");
    for value in [0.1, 0.1 + 0.2, 100.0, 1e-7, 5e-324] {
        let shortest = Decimal::from_f64(value);
        let (back, exact) = shortest.to_f64();
        println!("  {:e} -> {} (round trip {}, exact {})", value, shortest, back == value, exact);
    }
    println!("  0.1 in binary is exactly {}", Decimal::from_f64_exact(0.1));

    // Parsing keeps the representation
    println!("\nParsing:");
    for text in ["123.450", "-0.001", "6.02214076e23", "1.2.3", "1e99999999999"] {
        match text.parse::<Decimal>() {
            Ok(d) => println!(
                "  {:>16} -> {} (coefficient {}, exponent {})",
                text,
                d,
                d.coefficient(),
                d.exponent()
            ),
            Err(err) => println!("  {:>16} -> error: {}", text, err),
        }
    }

    // Arithmetic
    println!("\nArithmetic:");
    let price: Decimal = "19.99".parse().unwrap();
    let quantity = Decimal::new(3, 0);
    let total = &price * &quantity;
    println!("  {} x {} = {}", price, quantity, total);
    println!("  {} / 7 = {}", total, &total / &Decimal::new(7, 0));
    println!("  {} % 7 = {}", total, &total % &Decimal::new(7, 0));
    println!("  1.05 ^ 10 = {}", "1.05".parse::<Decimal>().unwrap().pow(&Decimal::new(10, 0)).unwrap());

    // Rounding
    println!("\nRounding {}:", total);
    println!("  round(1)        = {}", total.round(1));
    println!("  floor           = {}", total.floor());
    println!("  ceil            = {}", total.ceil());
    println!("  truncate(1)     = {}", total.truncate(1));
    println!("  string_fixed(4) = {}", total.string_fixed(4));

    // Configuration replaces process-wide settings
    println!("\nConfigured division:");
    let config = DecimalConfig::currency();
    match config.validate() {
        Ok(()) => println!("  currency: 1 / 3 = {}", config.divide(&Decimal::new(1, 0), &Decimal::new(3, 0))),
        Err(err) => println!("  invalid config: {}", err),
    }
    match config.checked_divide(&total, &Decimal::ZERO) {
        Ok(value) => println!("  unexpected quotient {}", value),
        Err(err) => println!("  division by zero reported: {}", err),
    }

    // Encodings
    println!("\nEncodings:");
    println!("  binary {:02x?}", total.to_bytes());
    let record = NumberValue::new(total.clone()).unwrap();
    let wire = record.encode().unwrap();
    println!(
        "  wire precision {} scale {} bytes {:02x?}",
        record.precision, record.scale, wire
    );
    let decoded = NumberValue::decode(&wire).unwrap();
    println!("  decoded {}", decoded.value);
}
