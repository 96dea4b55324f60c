use clap::Args;
use ferrum_r5::ResourceRegistry;

/// List registered resource types
#[derive(Args, Debug)]
pub struct TypesCommand {
    /// Print only the number of registered types
    #[arg(long)]
    pub count: bool,
}

impl TypesCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let registry = ResourceRegistry::r5();

        if self.count {
            println!("{}", registry.len());
            return Ok(());
        }

        for resource_type in registry.resource_types() {
            println!("{resource_type}");
        }
        Ok(())
    }
}
