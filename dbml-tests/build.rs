fn main() {
    // Generate Go and Elm sources for the fixture schema into OUT_DIR.
    // Tests read them back with include_str!
    let out_dir = std::env::var("OUT_DIR").unwrap();
    dbml_codegen::CodegenBuilder::new("../fixtures/shop.dbml")
        .output_dir(&out_dir)
        .package_name("data")
        .elm()
        .endpoint_prefix("api")
        .skip_format()
        .generate()
        .expect("codegen failed");

    println!("cargo:rerun-if-changed=../fixtures/shop.dbml");
}
