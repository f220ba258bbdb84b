use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ned::{ast::TokenStream, lexer::tokenize, ParseOptions, SourceMap};

const UNIT: &str = r#"
// A host with a configurable number of applications.
module Host like IHost
{
    parameters:
        int numApps = default(2);
        double startTime @unit(s) = uniform(0s, 1s);
        @display("i=device/pc");
    gates:
        inout ethg[];
    submodules:
        app[numApps]: <default("UdpApp")> like IApp {
            localPort = 1000 + index;
        }
        eth[sizeof(ethg)]: EthernetInterface;
    connections allowunconnected:
        for i=0..sizeof(ethg)-1 {
            eth[i].phys <--> { delay = 1us; datarate = 100Mbps; } <--> ethg[i];
        }
        app[0].out --> eth[0].upperIn if numApps > 0;
}
"#;

fn input(kb: usize) -> String {
    let mut text = String::from("package bench.net;\n");
    let mut i = 0;
    while text.len() < kb * 1024 {
        text.push_str(&UNIT.replace("Host", &format!("Host{}", i)));
        i += 1;
    }
    text
}

fn lexer_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("ned::lexer::by_input_size");
    for size in [1, 4, 16] {
        let text = input(size);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}KB", size)), &text, |b, text| {
            b.iter(|| tokenize(text).count())
        });
    }
    group.finish()
}

fn token_trees(c: &mut Criterion) {
    let mut group = c.benchmark_group("ned::tokenstream::by_input_size");
    for size in [1, 4, 16] {
        let text = input(size);
        let mut smap = SourceMap::new();
        let asset = smap.load_raw("raw:bench", &text);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}KB", size)), &size, |b, _| {
            b.iter(|| TokenStream::new(asset).unwrap())
        });
    }
    group.finish()
}

fn parse_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("ned::parser::by_input_size");
    for size in [1, 4, 16] {
        let text = input(size);
        let mut smap = SourceMap::new();
        let asset = smap.load_raw("raw:bench", &text);
        let opts = ParseOptions::default();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}KB", size)), &size, |b, _| {
            b.iter(|| ned::parse(asset, &opts).unwrap())
        });
    }
    group.finish()
}

criterion_group!(benches, lexer_tokenize, token_trees, parse_file);
criterion_main!(benches);
