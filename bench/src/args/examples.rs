const EXAMPLES: &str = r#"EXAMPLES:

1) Default benchmark against a local broker:

    Start 10 subscribers on topic "/test" of tcp://localhost:1883, each waiting
    for 100 messages, then print the text report:

    $ cargo r --bin mqtt-sub-bench

    Messages are expected to be JSON documents of the form
    {"GeneratedAt": <unix nanos>, "ClientId": <int>, "MessageId": <int>}
    published by a separate load generator.

2) Larger run with JSON output and a deadline:

    $ cargo r --bin mqtt-sub-bench -r -- --clients 50 --count 10000 --qos 0 --format json --timeout 5m

    A subscriber that does not receive its messages within 5 minutes fails the run
    instead of hanging forever.

3) Mutual TLS with credentials, saving the full report:

    $ cargo r --bin mqtt-sub-bench -r -- --broker ssl://broker.example.com:8883 \
        --username bench --password secret \
        --client-cert client.pem --client-key client.key \
        --output-dir performance_results --identifier my-laptop
"#;

pub fn print_examples() {
    println!("{}", EXAMPLES);
}
