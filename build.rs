fn main() {
    // Only emit the ESP-IDF sysenv when building for the device; host
    // test builds leave the `espidf` feature off.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
