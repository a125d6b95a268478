// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use ifsentry::check::{
    BaseRequest, CheckCpuLoadRequest, CheckInterfaceMetricsRequest, CheckResponse, CheckUpsRequest,
};
use ifsentry::cli::{CheckCommands, Cli, Commands, DeviceArgs};
use ifsentry::common::config::AppConfig;
use ifsentry::device::DeviceClass;
use ifsentry::error::Result;
use ifsentry::mock::MockSnmpAgent;
use ifsentry::monitoring::{CheckResult, Status};
use ifsentry::network::{DeviceConnection, RequestContext};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(AppConfig::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Check(command) => match run_check(command).await {
            Ok(response) => {
                println!("{}", response.render());
                response.exit_code()
            }
            Err(err) => {
                // setup failures (bad arguments, unreadable snapshot) are
                // reported in plugin form as well
                println!("{}: {err}", Status::Unknown);
                Status::Unknown.exit_code()
            }
        },
    };

    std::process::exit(code);
}

async fn run_check(command: CheckCommands) -> Result<CheckResponse> {
    let device = match &command {
        CheckCommands::InterfaceMetrics(args) => &args.device,
        CheckCommands::UpsMainsVoltage(args) => args,
        CheckCommands::CpuLoad(args) => args,
    };
    let (ctx, base) = request_environment(device)?;

    // Ctrl+C and the check timeout both trip the request token; in-flight
    // adapter calls then fail with a cancellation error.
    let cancel = ctx.cancellation_token().clone();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        }
    });
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(AppConfig::CHECK_TIMEOUT_SECS)).await;
        cancel.cancel();
    });

    let response = match command {
        CheckCommands::InterfaceMetrics(args) => {
            let request = CheckInterfaceMetricsRequest {
                base,
                filter: args.filter,
                print_interfaces: args.print_interfaces,
            };
            let mut mon = CheckResult::new("checked interface metrics");
            request.process(&ctx, &mut mon).await
        }
        CheckCommands::UpsMainsVoltage(_) => {
            let request = CheckUpsRequest { base };
            let mut mon = CheckResult::new("checked ups");
            request.process(&ctx, &mut mon).await
        }
        CheckCommands::CpuLoad(_) => {
            let request = CheckCpuLoadRequest { base };
            let mut mon = CheckResult::new("checked cpu load");
            request.process(&ctx, &mut mon).await
        }
    };

    Ok(response)
}

fn request_environment(device: &DeviceArgs) -> Result<(RequestContext, BaseRequest)> {
    let device_class: DeviceClass = device.device_class.parse()?;
    let agent = MockSnmpAgent::from_file(&device.snapshot)?;

    let ctx = RequestContext::new()
        .with_connection(DeviceConnection::with_snmp(Arc::new(agent)))
        .with_cancellation(CancellationToken::new());
    let base = BaseRequest {
        host: device.host.clone(),
        device_class,
    };

    Ok((ctx, base))
}
