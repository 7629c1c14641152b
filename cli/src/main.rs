mod commands;
mod terminal;

use std::sync::Arc;

use commands::{CommandLine, Commands, bind, endpoints, interfaces, resolve};
use nodeaddr_core::{AddressResolver, EndpointBuilder};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let conf = commands.load_config()?;
    let builder = EndpointBuilder::new(conf, Arc::new(AddressResolver::system()));

    let result = match commands.command {
        Commands::Ip => {
            print::header("local address");
            resolve::ip(&builder).await
        }
        Commands::Hostname => {
            print::header("local host name");
            resolve::hostname(&builder).await
        }
        Commands::Resolve { name } => {
            print::header("host name resolution");
            resolve::resolve(&builder, &name).await
        }
        Commands::Uri { uri } => {
            print::header("uri resolution");
            resolve::uri(&builder, &uri).await
        }
        Commands::Parse { endpoint } => resolve::parse(&endpoint),
        Commands::Endpoints { role } => {
            print::header("endpoints");
            endpoints::endpoints(&builder, role).await
        }
        Commands::Interfaces => {
            print::header("network interfaces");
            interfaces::interfaces()
        }
        Commands::Bind { role } => {
            print::header("bind");
            bind::bind(&builder, role).await
        }
    };

    print::end_of_program();
    result
}
