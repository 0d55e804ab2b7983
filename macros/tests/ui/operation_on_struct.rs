use concierge_macros::Operation;

#[derive(Operation)]
struct ParcelSuccess;

fn main() {
    let _ = ParcelSuccess;
}
