use concierge_macros::Operation;

#[derive(Operation)]
#[operation(label = "ParcelOps")]
enum ParcelSuccess {
    ReceiveParcel,
}

fn main() {
    let _ = ParcelSuccess::ReceiveParcel;
}
