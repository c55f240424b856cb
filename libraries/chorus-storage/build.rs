// `sqlx::migrate!` embeds the SQL at compile time; adding or editing a file
// under migrations/ must invalidate that embedding.
fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
