// ESP-IDF link and cfg arguments are only needed for the firmware build.
fn main() {
    #[cfg(feature = "esp")]
    {
        embuild::build::CfgArgs::output_propagated("ESP_IDF").expect("esp-idf cfg args");
        embuild::build::LinkArgs::output_propagated("ESP_IDF").expect("esp-idf link args");
    }
}
