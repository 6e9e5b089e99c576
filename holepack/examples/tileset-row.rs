use holepack::{HolePacker, InputItem};

fn main() {
    env_logger::init();

    let inputs: Vec<_> = (0..5).map(|_| InputItem::new((128, 128))).collect();

    let packer = HolePacker::new().max_width(640);

    match packer.pack(inputs) {
        Ok(output) => {
            println!("Packed into {}x{}:", output.width(), output.height());

            for item in output.items() {
                println!("  {:?} at {:?}", item.id(), item.position());
            }
        }
        Err(err) => eprintln!("Error: {}", err),
    }
}
