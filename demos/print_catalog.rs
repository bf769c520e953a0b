use ec2_catalog::CatalogError;

fn main() -> Result<(), CatalogError> {
    env_logger::init();

    let types = ec2_catalog::fetch_catalog()?;
    for t in &types {
        println!(
            "{:<14} {:>3} vCPU {:>7} GiB  {:<20} {}",
            t.name, t.cpus, t.memory, t.storage, t.network_spec,
        );
    }
    println!("instance types: {}", types.len());
    Ok(())
}
